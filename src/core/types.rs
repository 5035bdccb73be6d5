use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sales invoice as stored by the shop backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Database identifier. Doubles as the row number (LpSprzedazy) in the report.
    pub id: u64,
    /// Invoice number printed on the document (DowodSprzedazy).
    pub number: String,
    /// Creation date; also the issue date reported to the tax office.
    pub create_date: NaiveDate,
    /// The order this invoice was issued for.
    pub order: Order,
}

/// A customer order with its shipping address and products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Display name of the buyer.
    pub owner_name: String,
    pub country: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    /// Ordered line products.
    pub products: Vec<Product>,
}

/// A single product on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Net price.
    pub price: Decimal,
    /// Tax rate label as stored: `"zw"`, `"0"`, `"5"`, `"8"` or `"23"`.
    pub tax_rate: String,
}

impl Product {
    pub fn new(price: Decimal, tax_rate: impl Into<String>) -> Self {
        Self {
            price,
            tax_rate: tax_rate.into(),
        }
    }

    /// The recognized tax rate of this product, if its label is valid.
    pub fn rate(&self) -> Option<TaxRate> {
        TaxRate::from_label(&self.tax_rate)
    }
}

/// Polish VAT rates that appear in the JPK_VAT sales register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaxRate {
    /// Zwolnione — exempt from VAT ("zw").
    Exempt,
    /// 0%.
    Zero,
    /// 5% reduced rate.
    Reduced5,
    /// 8% reduced rate (formerly 7%).
    Reduced8,
    /// 23% standard rate (formerly 22%).
    Standard23,
}

impl TaxRate {
    /// All rates, in report column order.
    pub const ALL: [TaxRate; 5] = [
        TaxRate::Exempt,
        TaxRate::Zero,
        TaxRate::Reduced5,
        TaxRate::Reduced8,
        TaxRate::Standard23,
    ];

    /// Parse a stored rate label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "zw" => Some(Self::Exempt),
            "0" => Some(Self::Zero),
            "5" => Some(Self::Reduced5),
            "8" => Some(Self::Reduced8),
            "23" => Some(Self::Standard23),
            _ => None,
        }
    }

    /// The stored label for this rate.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Exempt => "zw",
            Self::Zero => "0",
            Self::Reduced5 => "5",
            Self::Reduced8 => "8",
            Self::Standard23 => "23",
        }
    }

    /// Percentage used to compute tax due. `None` for rates that carry no tax field.
    pub fn taxed_percent(&self) -> Option<Decimal> {
        match self {
            Self::Exempt | Self::Zero => None,
            Self::Reduced5 => Some(Decimal::from(5)),
            Self::Reduced8 => Some(Decimal::from(8)),
            Self::Standard23 => Some(Decimal::from(23)),
        }
    }
}

impl std::fmt::Display for TaxRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
