/// Canvas the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "#showcase-canvas";

pub const NEXT_BUTTON_ID: &str = "nextCar";
pub const PREVIOUS_BUTTON_ID: &str = "prevCar";

pub const NAME_ID: &str = "carName";
pub const LOGO_ID: &str = "carLogo";
pub const PRICE_ID: &str = "specPrice";
pub const SPEED_ID: &str = "specSpeed";
pub const POWER_ID: &str = "specPower";
pub const GEARBOX_ID: &str = "specGearbox";

/// Optional element that receives loading/failure status text.
pub const STATUS_ID: &str = "carStatus";

/// Page-relative prefix Bevy's web asset reader resolves asset paths under.
pub const WEB_ASSET_ROOT: &str = "assets";
