pub mod assets;
pub mod camera;
pub mod core;
pub mod loading;
pub mod scene;
