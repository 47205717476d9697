//! Dashboard settings.
//!
//! An explicit, enumerated configuration structure. Every field has a typed
//! value and every edit goes through [`SettingChange`], so there is no
//! stringly-typed settings map anywhere.

pub mod settings;

pub use settings::{
    BackupFrequency, Currency, GeneralSettings, NotificationSettings, PasswordExpiry,
    SecuritySettings, SettingChange, Settings, SettingsError, SettingsSection, SystemSettings,
    Timezone,
};
