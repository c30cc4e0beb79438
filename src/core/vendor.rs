use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vendor (feirante) profile.
///
/// # Examples
///
/// ```
/// use fair_settlement::core::vendor::VendorId;
///
/// let ana = VendorId::new("V-001");
/// let bruno = VendorId::new("V-002");
/// assert_ne!(ana, bruno);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(String);

impl VendorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VendorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a scheduled fair event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Membership tier, which selects the commission rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    Member,
    NonMember,
}

impl MembershipTier {
    pub fn from_member_flag(member: bool) -> Self {
        if member {
            MembershipTier::Member
        } else {
            MembershipTier::NonMember
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipTier::Member => write!(f, "member"),
            MembershipTier::NonMember => write!(f, "non-member"),
        }
    }
}

/// Bank reference shown to the treasurer when paying a vendor out.
///
/// Display only; nothing in the settlement reads these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankingDetails {
    pub bank: Option<String>,
    pub agency: Option<String>,
    pub account: Option<String>,
    pub pix_key: Option<String>,
}

impl BankingDetails {
    pub fn is_empty(&self) -> bool {
        self.bank.is_none()
            && self.agency.is_none()
            && self.account.is_none()
            && self.pix_key.is_none()
    }
}

impl fmt::Display for BankingDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = "-";
        write!(
            f,
            "bank {} / agency {} / account {} / PIX {}",
            self.bank.as_deref().unwrap_or(dash),
            self.agency.as_deref().unwrap_or(dash),
            self.account.as_deref().unwrap_or(dash),
            self.pix_key.as_deref().unwrap_or(dash),
        )
    }
}

/// A vendor profile as seen by one fair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    /// Association member flag ("membro").
    pub member: bool,
    #[serde(default)]
    pub banking: BankingDetails,
}

impl Vendor {
    pub fn new(id: VendorId, name: impl Into<String>, member: bool) -> Self {
        Self {
            id,
            name: name.into(),
            member,
            banking: BankingDetails::default(),
        }
    }

    pub fn with_banking(mut self, banking: BankingDetails) -> Self {
        self.banking = banking;
        self
    }

    pub fn tier(&self) -> MembershipTier {
        MembershipTier::from_member_flag(self.member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_id_equality() {
        let a = VendorId::new("V-001");
        let b = VendorId::new("V-001");
        let c = VendorId::new("V-002");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }

    #[test]
    fn test_tier_from_flag() {
        assert_eq!(MembershipTier::from_member_flag(true), MembershipTier::Member);
        assert_eq!(
            MembershipTier::from_member_flag(false),
            MembershipTier::NonMember
        );
        let vendor = Vendor::new(VendorId::new("V-1"), "Dona Maria", true);
        assert_eq!(vendor.tier(), MembershipTier::Member);
    }

    #[test]
    fn test_banking_display_fills_gaps() {
        let banking = BankingDetails {
            bank: Some("001".to_string()),
            pix_key: Some("maria@example.org".to_string()),
            ..Default::default()
        };
        assert!(!banking.is_empty());
        assert_eq!(
            banking.to_string(),
            "bank 001 / agency - / account - / PIX maria@example.org"
        );
        assert!(BankingDetails::default().is_empty());
    }

    #[test]
    fn test_vendor_deserializes_without_banking() {
        let vendor: Vendor =
            serde_json::from_str(r#"{"id":"V-9","name":"Seu João","member":false}"#).unwrap();
        assert_eq!(vendor.id.as_str(), "V-9");
        assert!(vendor.banking.is_empty());
    }
}
