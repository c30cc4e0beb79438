use crate::core::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a customer paid for a sale.
///
/// The set is closed. Text that does not name one of these methods is
/// rejected when the operation is recorded, never mapped to a default.
///
/// # Examples
///
/// ```
/// use fair_settlement::core::payment::{Holder, PaymentMethod};
///
/// let method: PaymentMethod = "dinheiro".parse().unwrap();
/// assert_eq!(method, PaymentMethod::Cash);
/// assert_eq!(PaymentMethod::Pix.holder(), Holder::Association);
/// assert!("cheque".parse::<PaymentMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Pix,
    Cash,
    Credit,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Pix, PaymentMethod::Cash, PaymentMethod::Credit];

    /// Which party ends up physically holding the money.
    ///
    /// PIX lands in the association's account; cash and card sales stay
    /// with the vendor.
    pub fn holder(self) -> Holder {
        match self {
            PaymentMethod::Pix => Holder::Association,
            PaymentMethod::Cash | PaymentMethod::Credit => Holder::Vendor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Credit => "Credit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                'á' | 'à' | 'ã' | 'â' | 'Á' | 'À' | 'Ã' | 'Â' => 'a',
                'é' | 'ê' | 'É' | 'Ê' => 'e',
                'í' | 'Í' => 'i',
                'ó' | 'õ' | 'ô' | 'Ó' | 'Õ' | 'Ô' => 'o',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "pix" => Ok(PaymentMethod::Pix),
            "cash" | "dinheiro" | "especie" => Ok(PaymentMethod::Cash),
            "credit" | "credito" | "cartao" | "card" => Ok(PaymentMethod::Credit),
            _ => Err(LedgerError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// The party holding the money from a sale until settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Holder {
    Vendor,
    Association,
}
