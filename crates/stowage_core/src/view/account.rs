//! Account settings: profile, billing and notification preferences.
//!
//! Settings live in memory for the lifetime of the page state.

use super::Notice;

pub const PROFILE_SAVED: &str = "Profile updated successfully!";
pub const BILLING_SAVED: &str = "Billing information updated!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccountTab {
    #[default]
    Profile,
    Billing,
    Notifications,
    Security,
}

impl AccountTab {
    pub const ALL: [AccountTab; 4] = [
        AccountTab::Profile,
        AccountTab::Billing,
        AccountTab::Notifications,
        AccountTab::Security,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::Billing => "Billing",
            Self::Notifications => "Notifications",
            Self::Security => "Security",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Billing {
    /// Only the last four digits are kept.
    pub card_number: String,
    pub expiry_date: String,
    pub billing_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingPatch {
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub billing_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSetting {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

/// Masks all but the last four digits, e.g. `**** **** **** 4567`.
pub fn mask_card_number(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let last_four: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("**** **** **** {last_four}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    pub active_tab: AccountTab,
    pub profile: Profile,
    pub billing: Billing,
    pub notifications: Vec<NotificationSetting>,
}

impl Default for AccountSettings {
    fn default() -> Self {
        let address = "123 Main St, New York, NY 10001";
        Self {
            active_tab: AccountTab::default(),
            profile: Profile {
                name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: "+1 (555) 123-4567".to_string(),
                address: address.to_string(),
            },
            billing: Billing {
                card_number: mask_card_number("4567"),
                expiry_date: "12/25".to_string(),
                billing_address: address.to_string(),
            },
            notifications: vec![
                setting("pickup", "Pickup Reminders", "Get notified before scheduled pickups"),
                setting("delivery", "Delivery Updates", "Notifications about item deliveries"),
                setting("billing", "Billing Notifications", "Payment receipts and billing reminders"),
                setting("security", "Security Alerts", "Account security and access notifications"),
            ],
        }
    }
}

fn setting(
    id: &'static str,
    label: &'static str,
    description: &'static str,
) -> NotificationSetting {
    NotificationSetting {
        id,
        label,
        description,
        enabled: true,
    }
}

impl AccountSettings {
    pub fn select_tab(&mut self, tab: AccountTab) {
        self.active_tab = tab;
    }

    pub fn save_profile(&mut self, patch: ProfilePatch) -> Notice {
        let profile = &mut self.profile;
        if let Some(name) = patch.name {
            profile.name = name;
        }
        if let Some(email) = patch.email {
            profile.email = email;
        }
        if let Some(phone) = patch.phone {
            profile.phone = phone;
        }
        if let Some(address) = patch.address {
            profile.address = address;
        }
        Notice::success(PROFILE_SAVED)
    }

    pub fn update_billing(&mut self, patch: BillingPatch) -> Notice {
        let billing = &mut self.billing;
        if let Some(card_number) = patch.card_number {
            billing.card_number = mask_card_number(&card_number);
        }
        if let Some(expiry_date) = patch.expiry_date {
            billing.expiry_date = expiry_date;
        }
        if let Some(billing_address) = patch.billing_address {
            billing.billing_address = billing_address;
        }
        Notice::success(BILLING_SAVED)
    }

    /// Flips a notification toggle; returns the new state or `None` for an
    /// unknown id.
    pub fn toggle_notification(&mut self, id: &str) -> Option<bool> {
        let setting = self.notifications.iter_mut().find(|s| s.id == id)?;
        setting.enabled = !setting.enabled;
        Some(setting.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_numbers_keep_last_four_digits() {
        assert_eq!(mask_card_number("4111 1111 1111 1234"), "**** **** **** 1234");
        assert_eq!(mask_card_number("12"), "**** **** **** 12");
    }

    #[test]
    fn profile_patch_only_touches_given_fields() {
        let mut settings = AccountSettings::default();
        let notice = settings.save_profile(ProfilePatch {
            phone: Some("+1 (555) 000-0000".to_string()),
            ..ProfilePatch::default()
        });

        assert_eq!(notice, Notice::success(PROFILE_SAVED));
        assert_eq!(settings.profile.phone, "+1 (555) 000-0000");
        assert_eq!(settings.profile.name, "John Doe");
    }

    #[test]
    fn billing_update_masks_card() {
        let mut settings = AccountSettings::default();
        settings.update_billing(BillingPatch {
            card_number: Some("5500000000000004".to_string()),
            ..BillingPatch::default()
        });
        assert_eq!(settings.billing.card_number, "**** **** **** 0004");
        assert_eq!(settings.billing.expiry_date, "12/25");
    }

    #[test]
    fn notification_toggles_flip_known_ids_only() {
        let mut settings = AccountSettings::default();
        assert_eq!(settings.toggle_notification("billing"), Some(false));
        assert_eq!(settings.toggle_notification("billing"), Some(true));
        assert_eq!(settings.toggle_notification("sms"), None);
    }
}
