/// Catalog of showcased cars, relative to the asset root.
pub const CATALOG_PATH: &str = "catalog.json";

/// Studio environment, prefiltered into diffuse and specular cubemaps.
pub const ENVIRONMENT_DIFFUSE_MAP: &str = "environment_maps/studio_small_09_diffuse_rgb9e5_zstd.ktx2";
pub const ENVIRONMENT_SPECULAR_MAP: &str =
    "environment_maps/studio_small_09_specular_rgb9e5_zstd.ktx2";

/// Scene index used from every car's glTF file.
pub const MODEL_SCENE_INDEX: usize = 0;
