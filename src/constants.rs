//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, flag-variable names and default paths.

/// The name of the application as shown in `--help` and `--version`.
pub const APP_NAME: &str = "karabingen";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "karabingen";

/// Environment variable that overrides the settings directory.
pub const CONFIG_DIR_ENV: &str = "KARABINGEN_CONFIG_DIR";

/// Flag variable raised while the hyper key is held.
pub const HYPER_VARIABLE: &str = "hyper";

/// Prefix of every sublayer flag variable (`hyper_sublayer_<key>`).
pub const SUBLAYER_VARIABLE_PREFIX: &str = "hyper_sublayer_";

/// Manipulator type tag understood by the target engine.
pub const MANIPULATOR_TYPE_BASIC: &str = "basic";

/// Only supported version of the YAML file format.
pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Default hyper key.
pub const DEFAULT_HYPER_KEY: &str = "caps_lock";

/// Profile written into karabiner.json when nothing else is configured.
pub const DEFAULT_PROFILE_NAME: &str = "base";

/// Keyboard type stored in `virtual_hid_keyboard.keyboard_type_v2`.
pub const DEFAULT_KEYBOARD_TYPE: &str = "iso";

/// Shell command used to open URLs and other resources.
pub const OPEN_COMMAND: &str = "open";

/// Bundle identifier pattern matching Safari.
pub const SAFARI_BUNDLE_PATTERN: &str = "^com\\.apple\\.Safari$";
