//! Device library namespace: constants first, enumerations second.
//!
//! Names defined by both sources resolve from `constants`. Each source is
//! decoded independently, so a lookup answered by `constants` never touches
//! `types`.

use std::sync::OnceLock;

use lode_namespace::{BuildError, Namespace, StaticSource, Value, parse_toml_table, symbol_catalog};

/// Namespace name reported in errors and stats.
pub const NAME: &str = "library";

symbol_catalog! {
	/// Every symbol the library namespace serves, constants first.
	pub CATALOG {
		VERSION,
		SUCTION_LEVEL_QUIET,
		ACTION_TO_NAME,
		CLEANING_MODE_CODE_TO_NAME,
		CLEANING_ROUTE_TO_NAME,
		CUSTOM_MOPPING_ROUTE_TO_NAME,
		DEVICE_INFO,
		FLOOR_MATERIAL_CODE_TO_NAME,
		FLOOR_MATERIAL_DIRECTION_CODE_TO_NAME,
		MOP_PAD_HUMIDITY_CODE_TO_NAME,
		PROPERTY_TO_NAME,
		SEGMENT_VISIBILITY_CODE_TO_NAME,
		STATUS_CODE_TO_NAME,
		SUCTION_LEVEL_CODE_TO_NAME,
		WATER_VOLUME_CODE_TO_NAME,
		MAP_COLOR_SCHEME_LIST,
		MAP_ICON_SET_LIST,
		ACTION_AVAILABILITY,
		PROPERTY_AVAILABILITY,
		DreameVacuumAction,
		DreameVacuumAIProperty,
		DreameVacuumAutoEmptyMode,
		DreameVacuumAutoEmptyStatus,
		DreameVacuumAutoSwitchProperty,
		DreameVacuumCarpetCleaning,
		DreameVacuumCarpetSensitivity,
		DreameVacuumCleanGenius,
		DreameVacuumCleanGeniusMode,
		DreameVacuumCleaningMode,
		DreameVacuumCleaningRoute,
		DreameVacuumCustomMoppingRoute,
		DreameVacuumDrainageStatus,
		DreameVacuumFloorMaterial,
		DreameVacuumFloorMaterialDirection,
		DreameVacuumLowWaterWarning,
		DreameVacuumMopCleanFrequency,
		DreameVacuumMopExtendFrequency,
		DreameVacuumMopPadHumidity,
		DreameVacuumMopPadSwing,
		DreameVacuumMoppingType,
		DreameVacuumMopWashLevel,
		DreameVacuumProperty,
		DreameVacuumRelocationStatus,
		DreameVacuumSecondCleaning,
		DreameVacuumSegmentVisibility,
		DreameVacuumSelfCleanFrequency,
		DreameVacuumState,
		DreameVacuumStrAIProperty,
		DreameVacuumStreamStatus,
		DreameVacuumSuctionLevel,
		DreameVacuumTaskStatus,
		DreameVacuumTaskType,
		DreameVacuumVoiceAssistantLanguage,
		DreameVacuumWashingMode,
		DreameVacuumWaterTemperature,
		DreameVacuumWaterVolume,
		DreameVacuumWiderCornerCoverage,
	}
}

const CONSTANTS: &str = include_str!("../data/constants.toml");
const TYPES: &str = include_str!("../data/types.toml");

/// Builds a fresh, unshared library namespace.
pub fn new_namespace() -> Result<Namespace<Value>, BuildError> {
	Namespace::builder(NAME)
		.symbols(CATALOG.iter().copied())
		.source(StaticSource::new("constants", || parse_toml_table("constants.toml", CONSTANTS)))
		.source(StaticSource::new("types", || parse_toml_table("types.toml", TYPES)))
		.build()
}

static LIBRARY: OnceLock<Namespace<Value>> = OnceLock::new();

/// Process-wide library namespace.
pub fn library() -> &'static Namespace<Value> {
	LIBRARY.get_or_init(|| {
		tracing::debug!(namespace = NAME, symbols = CATALOG.len(), "assets.init");
		new_namespace().expect("library catalog is valid")
	})
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn sources_cover_the_catalog() {
		let constants = parse_toml_table("constants.toml", CONSTANTS).unwrap();
		let types = parse_toml_table("types.toml", TYPES).unwrap();
		let defined: BTreeSet<&str> = constants.names().chain(types.names()).collect();
		let declared: BTreeSet<&str> = CATALOG.iter().copied().collect();
		assert_eq!(defined, declared);
	}

	#[test]
	fn generated_constants_cover_both_sources() {
		assert_eq!(CATALOG.len(), 57);
		assert_eq!(CATALOG.first(), Some(&VERSION));
		assert_eq!(DreameVacuumSuctionLevel, "DreameVacuumSuctionLevel");
		assert!(CATALOG.contains(&SUCTION_LEVEL_QUIET));
	}
}
