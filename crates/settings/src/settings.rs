use serde::{Deserialize, Serialize};
use thiserror::Error;

use deskerp_core::{
    DomainError, DomainResult,
    error::{require_email, require_non_blank},
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

/// Allowed session timeouts, in minutes.
pub const SESSION_TIMEOUTS: [u32; 5] = [15, 30, 60, 120, 480];

/// Allowed password expiry periods, in days.
pub const PASSWORD_EXPIRY_DAYS: [u32; 4] = [30, 60, 90, 180];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timezone {
    #[serde(rename = "UTC-8")]
    Pacific,
    #[serde(rename = "UTC-7")]
    Mountain,
    #[serde(rename = "UTC-6")]
    Central,
    #[default]
    #[serde(rename = "UTC-5")]
    Eastern,
    #[serde(rename = "UTC+0")]
    Utc,
}

impl Timezone {
    /// Offset from UTC in whole hours.
    pub fn offset_hours(self) -> i32 {
        match self {
            Timezone::Pacific => -8,
            Timezone::Mountain => -7,
            Timezone::Central => -6,
            Timezone::Eastern => -5,
            Timezone::Utc => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Cad => "CAD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordExpiry {
    Days(u32),
    Never,
}

impl Default for PasswordExpiry {
    fn default() -> Self {
        PasswordExpiry::Days(90)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralSettings {
    pub company_name: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: String,
    pub timezone: Timezone,
    pub currency: Currency,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            company_name: "My Company".to_string(),
            company_email: "admin@mycompany.com".to_string(),
            company_phone: "+1 (555) 123-4567".to_string(),
            company_address: "123 Business St, City, State 12345".to_string(),
            timezone: Timezone::default(),
            currency: Currency::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub order_notifications: bool,
    pub inventory_alerts: bool,
    pub system_updates: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            order_notifications: true,
            inventory_alerts: true,
            system_updates: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub two_factor_auth: bool,
    pub session_timeout_minutes: u32,
    pub password_expiry: PasswordExpiry,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            two_factor_auth: false,
            session_timeout_minutes: 30,
            password_expiry: PasswordExpiry::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub auto_backup: bool,
    pub backup_frequency: BackupFrequency,
    pub maintenance_mode: bool,
    pub debug_mode: bool,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            auto_backup: true,
            backup_frequency: BackupFrequency::default(),
            maintenance_mode: false,
            debug_mode: false,
        }
    }
}

/// Tabs of the settings screen; each is saved independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsSection {
    General,
    Notifications,
    Security,
    System,
}

impl SettingsSection {
    pub fn name(self) -> &'static str {
        match self {
            SettingsSection::General => "general",
            SettingsSection::Notifications => "notifications",
            SettingsSection::Security => "security",
            SettingsSection::System => "system",
        }
    }
}

/// A single field edit from the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingChange {
    CompanyName(String),
    CompanyEmail(String),
    CompanyPhone(String),
    CompanyAddress(String),
    Timezone(Timezone),
    Currency(Currency),
    EmailNotifications(bool),
    OrderNotifications(bool),
    InventoryAlerts(bool),
    SystemUpdates(bool),
    TwoFactorAuth(bool),
    SessionTimeoutMinutes(u32),
    PasswordExpiry(PasswordExpiry),
    AutoBackup(bool),
    BackupFrequency(BackupFrequency),
    MaintenanceMode(bool),
    DebugMode(bool),
}

impl SettingChange {
    pub fn section(&self) -> SettingsSection {
        match self {
            SettingChange::CompanyName(_)
            | SettingChange::CompanyEmail(_)
            | SettingChange::CompanyPhone(_)
            | SettingChange::CompanyAddress(_)
            | SettingChange::Timezone(_)
            | SettingChange::Currency(_) => SettingsSection::General,
            SettingChange::EmailNotifications(_)
            | SettingChange::OrderNotifications(_)
            | SettingChange::InventoryAlerts(_)
            | SettingChange::SystemUpdates(_) => SettingsSection::Notifications,
            SettingChange::TwoFactorAuth(_)
            | SettingChange::SessionTimeoutMinutes(_)
            | SettingChange::PasswordExpiry(_) => SettingsSection::Security,
            SettingChange::AutoBackup(_)
            | SettingChange::BackupFrequency(_)
            | SettingChange::MaintenanceMode(_)
            | SettingChange::DebugMode(_) => SettingsSection::System,
        }
    }
}

/// Missing sections deserialize to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub system: SystemSettings,
}

impl Settings {
    /// Load and validate a JSON settings document.
    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("company name", &self.general.company_name)?;
        require_email("company email", &self.general.company_email)?;
        validate_session_timeout(self.security.session_timeout_minutes)?;
        validate_password_expiry(self.security.password_expiry)
    }

    /// Apply one field edit. Invalid edits leave the settings untouched.
    pub fn apply(&mut self, change: SettingChange) -> DomainResult<()> {
        match change {
            SettingChange::CompanyName(name) => {
                require_non_blank("company name", &name)?;
                self.general.company_name = name;
            }
            SettingChange::CompanyEmail(email) => {
                require_email("company email", &email)?;
                self.general.company_email = email;
            }
            SettingChange::CompanyPhone(phone) => self.general.company_phone = phone,
            SettingChange::CompanyAddress(address) => self.general.company_address = address,
            SettingChange::Timezone(tz) => self.general.timezone = tz,
            SettingChange::Currency(currency) => self.general.currency = currency,
            SettingChange::EmailNotifications(on) => self.notifications.email_notifications = on,
            SettingChange::OrderNotifications(on) => self.notifications.order_notifications = on,
            SettingChange::InventoryAlerts(on) => self.notifications.inventory_alerts = on,
            SettingChange::SystemUpdates(on) => self.notifications.system_updates = on,
            SettingChange::TwoFactorAuth(on) => self.security.two_factor_auth = on,
            SettingChange::SessionTimeoutMinutes(minutes) => {
                validate_session_timeout(minutes)?;
                self.security.session_timeout_minutes = minutes;
            }
            SettingChange::PasswordExpiry(expiry) => {
                validate_password_expiry(expiry)?;
                self.security.password_expiry = expiry;
            }
            SettingChange::AutoBackup(on) => self.system.auto_backup = on,
            SettingChange::BackupFrequency(frequency) => self.system.backup_frequency = frequency,
            SettingChange::MaintenanceMode(on) => self.system.maintenance_mode = on,
            SettingChange::DebugMode(on) => self.system.debug_mode = on,
        }
        Ok(())
    }

    /// Snapshot one section as JSON, the payload a backend save would receive.
    pub fn save_section(&self, section: SettingsSection) -> Result<String, SettingsError> {
        let payload = match section {
            SettingsSection::General => serde_json::to_string(&self.general)?,
            SettingsSection::Notifications => serde_json::to_string(&self.notifications)?,
            SettingsSection::Security => serde_json::to_string(&self.security)?,
            SettingsSection::System => serde_json::to_string(&self.system)?,
        };
        tracing::info!(section = section.name(), "settings saved");
        Ok(payload)
    }
}

fn validate_session_timeout(minutes: u32) -> DomainResult<()> {
    if SESSION_TIMEOUTS.contains(&minutes) {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "session timeout must be one of {SESSION_TIMEOUTS:?} minutes"
        )))
    }
}

fn validate_password_expiry(expiry: PasswordExpiry) -> DomainResult<()> {
    match expiry {
        PasswordExpiry::Never => Ok(()),
        PasswordExpiry::Days(days) if PASSWORD_EXPIRY_DAYS.contains(&days) => Ok(()),
        PasswordExpiry::Days(_) => Err(DomainError::validation(format!(
            "password expiry must be one of {PASSWORD_EXPIRY_DAYS:?} days or never"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fresh_install() {
        let settings = Settings::default();
        assert_eq!(settings.general.company_name, "My Company");
        assert_eq!(settings.general.timezone, Timezone::Eastern);
        assert_eq!(settings.general.currency.code(), "USD");
        assert!(settings.notifications.inventory_alerts);
        assert!(!settings.notifications.system_updates);
        assert_eq!(settings.security.session_timeout_minutes, 30);
        assert_eq!(settings.security.password_expiry, PasswordExpiry::Days(90));
        assert_eq!(settings.system.backup_frequency, BackupFrequency::Daily);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let raw = r#"{
            "general": {
                "company_name": "Acme",
                "company_email": "ops@acme.test",
                "company_phone": "",
                "company_address": "",
                "timezone": "UTC+0",
                "currency": "EUR"
            },
            "security": {
                "two_factor_auth": true,
                "session_timeout_minutes": 60,
                "password_expiry": "never"
            }
        }"#;

        let settings = Settings::from_json(raw).unwrap();
        assert_eq!(settings.general.timezone, Timezone::Utc);
        assert_eq!(settings.general.currency, Currency::Eur);
        assert_eq!(settings.security.password_expiry, PasswordExpiry::Never);
        assert_eq!(settings.system, SystemSettings::default());
        assert_eq!(settings.notifications, NotificationSettings::default());
    }

    #[test]
    fn invalid_document_values_are_rejected() {
        let raw = r#"{
            "security": {
                "two_factor_auth": false,
                "session_timeout_minutes": 7,
                "password_expiry": { "days": 90 }
            }
        }"#;
        let err = Settings::from_json(raw).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(DomainError::Validation(_))));

        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn apply_validates_and_leaves_state_on_error() {
        let mut settings = Settings::default();

        settings.apply(SettingChange::SessionTimeoutMinutes(120)).unwrap();
        assert_eq!(settings.security.session_timeout_minutes, 120);

        let err = settings.apply(SettingChange::SessionTimeoutMinutes(45)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(settings.security.session_timeout_minutes, 120);

        assert!(settings.apply(SettingChange::CompanyEmail("nope".into())).is_err());
        assert_eq!(settings.general.company_email, "admin@mycompany.com");

        assert!(settings.apply(SettingChange::PasswordExpiry(PasswordExpiry::Days(7))).is_err());
        settings.apply(SettingChange::PasswordExpiry(PasswordExpiry::Never)).unwrap();
        settings.apply(SettingChange::MaintenanceMode(true)).unwrap();
        assert!(settings.system.maintenance_mode);
    }

    #[test]
    fn changes_know_their_section() {
        assert_eq!(SettingChange::Currency(Currency::Gbp).section(), SettingsSection::General);
        assert_eq!(SettingChange::InventoryAlerts(false).section(), SettingsSection::Notifications);
        assert_eq!(SettingChange::TwoFactorAuth(true).section(), SettingsSection::Security);
        assert_eq!(SettingChange::DebugMode(true).section(), SettingsSection::System);
    }

    #[test]
    fn save_section_serializes_only_that_section() {
        let settings = Settings::default();
        let payload = settings.save_section(SettingsSection::System).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["backup_frequency"], "daily");
        assert!(value.get("company_name").is_none());
    }

    #[test]
    fn full_document_is_stable_json() {
        let settings = Settings::default();
        let json = settings.to_json_pretty().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
        assert_eq!(Timezone::Pacific.offset_hours(), -8);
    }
}
