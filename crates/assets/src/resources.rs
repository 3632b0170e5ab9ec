//! Embedded asset bundle: map images, icon sets and fonts.
//!
//! The bundle is compiled into the binary as one TOML document. Parsing it and
//! decoding its base64 payloads is the expensive part, so it happens only on the
//! first lookup, once for every symbol in the bundle.

use std::sync::OnceLock;

use lode_namespace::{BuildError, Namespace, StaticSource, Value, parse_toml_table, symbol_catalog};

symbol_catalog! {
	/// Every symbol the resources namespace serves, in listing order.
	pub CATALOG {
		CONSUMABLE_IMAGE,
		DEFAULT_MAP_DATA,
		DEFAULT_MAP_DATA_IMAGE,
		DEFAULT_MAP_IMAGE,
		DRAINAGE_STATUS_FAIL,
		DRAINAGE_STATUS_SUCCESS,
		ERROR_IMAGE,
		FURNITURE_TYPE_TO_ICON,
		FURNITURE_TYPE_TO_IMAGE,
		FURNITURE_V2_TYPE_MIJIA_TO_IMAGE,
		FURNITURE_V2_TYPE_TO_ICON,
		FURNITURE_V2_TYPE_TO_IMAGE,
		MAP_CHARGER_IMAGE_DREAME,
		MAP_CHARGER_IMAGE_MATERIAL,
		MAP_CHARGER_IMAGE_MIJIA,
		MAP_CHARGER_VSLAM_IMAGE_DREAME,
		MAP_FONT,
		MAP_FONT_LIGHT,
		MAP_ICON_CLEAN,
		MAP_ICON_CLEANING_MODE_DREAME,
		MAP_ICON_CLEANING_MODE_MATERIAL,
		MAP_ICON_CLEANING_MODE_MIJIA,
		MAP_ICON_CLEANING_ROUTE_DREAME,
		MAP_ICON_CLEANING_ROUTE_MATERIAL,
		MAP_ICON_CRUISE_POINT_BG_DREAME,
		MAP_ICON_CRUISE_POINT_DREAME,
		MAP_ICON_CUSTOM_MOPPING_ROUTE_DREAME,
		MAP_ICON_DELETE,
		MAP_ICON_MOP_PAD_HUMIDITY_DREAME,
		MAP_ICON_MOP_PAD_HUMIDITY_MATERIAL,
		MAP_ICON_MOVE,
		MAP_ICON_OBSTACLE_BG_DREAME,
		MAP_ICON_OBSTACLE_HIDDEN_BG_DREAME,
		MAP_ICON_PROBLEM,
		MAP_ICON_REPEATS_DREAME,
		MAP_ICON_REPEATS_MATERIAL,
		MAP_ICON_REPEATS_MIJIA,
		MAP_ICON_RESIZE,
		MAP_ICON_ROTATE,
		MAP_ICON_SELECTED_SEGMENT,
		MAP_ICON_SETTINGS,
		MAP_ICON_SUCTION_LEVEL_DREAME,
		MAP_ICON_SUCTION_LEVEL_MATERIAL,
		MAP_ICON_SUCTION_LEVEL_MIJIA,
		MAP_ICON_WATER_VOLUME_DREAME,
		MAP_ICON_WATER_VOLUME_MATERIAL,
		MAP_ICON_WATER_VOLUME_MIJIA,
		MAP_OPTIMIZER_JS,
		MAP_ROBOT_CHARGING_IMAGE,
		MAP_ROBOT_CLEANING_DIRECTION_IMAGE,
		MAP_ROBOT_CLEANING_IMAGE,
		MAP_ROBOT_DRYING_IMAGE,
		MAP_ROBOT_EMPTYING_IMAGE,
		MAP_ROBOT_HOT_DRYING_IMAGE,
		MAP_ROBOT_HOT_WASHING_IMAGE,
		MAP_ROBOT_LIDAR_IMAGE_DREAME_DARK,
		MAP_ROBOT_LIDAR_IMAGE_DREAME_LIGHT,
		MAP_ROBOT_LIDAR_IMAGE_MIJIA,
		MAP_ROBOT_MOP_CLEANING_IMAGE,
		MAP_ROBOT_MOP_IMAGE_DREAME,
		MAP_ROBOT_MOP_IMAGE_MIJIA,
		MAP_ROBOT_OBSTACLE_BOTTOM_LEFT_IMAGE,
		MAP_ROBOT_OBSTACLE_BOTTOM_RIGHT_IMAGE,
		MAP_ROBOT_OBSTACLE_TOP_LEFT_IMAGE,
		MAP_ROBOT_OBSTACLE_TOP_RIGHT_IMAGE,
		MAP_ROBOT_SLEEPING_IMAGE,
		MAP_ROBOT_VSLAM_IMAGE_DREAME_DARK,
		MAP_ROBOT_VSLAM_IMAGE_DREAME_LIGHT,
		MAP_ROBOT_VSLAM_IMAGE_MIJIA,
		MAP_ROBOT_WARNING_IMAGE,
		MAP_ROBOT_WASHING_IMAGE,
		MAP_WIFI_IMAGE_DREAME,
		OBSTACLE_TYPE_TO_HIDDEN_ICON,
		OBSTACLE_TYPE_TO_ICON,
		SEGMENT_ICONS_DREAME,
		SEGMENT_ICONS_DREAME_OLD,
		SEGMENT_ICONS_MATERIAL,
		SEGMENT_ICONS_MIJIA,
	}
}

/// Namespace name reported in errors and stats.
pub const NAME: &str = "resources";

const BUNDLE_ID: &str = "bundle";
const BUNDLE: &str = include_str!("../data/resources.toml");

/// Builds a fresh, unshared resources namespace.
///
/// Most callers want [`resources`]; separate instances are useful where cache
/// state must not be shared, such as tests.
pub fn new_namespace() -> Result<Namespace<Value>, BuildError> {
	Namespace::builder(NAME)
		.symbols(CATALOG.iter().copied())
		.source(StaticSource::new(BUNDLE_ID, || parse_toml_table("resources.toml", BUNDLE)))
		.build()
}

static RESOURCES: OnceLock<Namespace<Value>> = OnceLock::new();

/// Process-wide resources namespace.
///
/// Constructed on first call; the bundle itself is decoded on first lookup.
pub fn resources() -> &'static Namespace<Value> {
	RESOURCES.get_or_init(|| {
		tracing::debug!(namespace = NAME, symbols = CATALOG.len(), "assets.init");
		new_namespace().expect("embedded resource catalog is valid")
	})
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeSet;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn bundle_defines_exactly_the_catalog() {
		let table = parse_toml_table("resources.toml", BUNDLE).unwrap();
		let defined: BTreeSet<&str> = table.names().collect();
		let declared: BTreeSet<&str> = CATALOG.iter().copied().collect();
		assert_eq!(defined, declared);
	}

	#[test]
	fn generated_constants_match_their_names() {
		assert_eq!(MAP_FONT, "MAP_FONT");
		assert_eq!(CATALOG.first(), Some(&CONSUMABLE_IMAGE));
		assert_eq!(CATALOG.last(), Some(&SEGMENT_ICONS_MIJIA));
	}
}
