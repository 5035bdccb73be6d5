use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Builder for [`Invoice`].
///
/// ```
/// use jpk_vat::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let order = OrderBuilder::new("Jan Kowalski")
///     .country("Polska")
///     .postcode("00-001")
///     .city("Warszawa")
///     .street("Marszałkowska 1")
///     .product(dec!(100.00), "23")
///     .build();
///
/// let invoice = InvoiceBuilder::new(1, "FV/2021/03/001", NaiveDate::from_ymd_opt(2021, 3, 15).unwrap())
///     .order(order)
///     .build();
/// assert_eq!(invoice.order.products.len(), 1);
/// ```
pub struct InvoiceBuilder {
    id: u64,
    number: String,
    create_date: NaiveDate,
    order: Option<Order>,
}

impl InvoiceBuilder {
    pub fn new(id: u64, number: impl Into<String>, create_date: NaiveDate) -> Self {
        Self {
            id,
            number: number.into(),
            create_date,
            order: None,
        }
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Build the invoice. Without an order, an empty anonymous order is attached.
    pub fn build(self) -> Invoice {
        Invoice {
            id: self.id,
            number: self.number,
            create_date: self.create_date,
            order: self
                .order
                .unwrap_or_else(|| OrderBuilder::new("").build()),
        }
    }
}

/// Builder for [`Order`].
pub struct OrderBuilder {
    owner_name: String,
    country: Option<String>,
    postcode: Option<String>,
    city: Option<String>,
    street: Option<String>,
    products: Vec<Product>,
}

impl OrderBuilder {
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
            country: None,
            postcode: None,
            city: None,
            street: None,
            products: Vec::new(),
        }
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn postcode(mut self, postcode: impl Into<String>) -> Self {
        self.postcode = Some(postcode.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    /// Append a product with the given net price and tax rate label.
    pub fn product(mut self, price: Decimal, tax_rate: impl Into<String>) -> Self {
        self.products.push(Product::new(price, tax_rate));
        self
    }

    pub fn build(self) -> Order {
        Order {
            owner_name: self.owner_name,
            country: self.country,
            postcode: self.postcode,
            city: self.city,
            street: self.street,
            products: self.products,
        }
    }
}
