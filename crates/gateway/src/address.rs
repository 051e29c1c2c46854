//! Billing and delivery address mapping.
//!
//! The payment provider identifies customer fields by a type-prefixed key
//! convention: `BillingFirstnames`, `DeliveryPostCode` and so on. Address
//! data arrives as an [`AddressFields`] map using the same convention, where
//! a key may appear with a lower-case first letter (`billingCity`), an
//! upper-case one (`BillingCity`), or both.
//!
//! [`map_address`] reads the nine canonical fields for one party into a
//! fixed-shape [`CustomerDetails`]. For each field the lower-case key is read
//! first and the upper-case key second, so the upper-case value wins when
//! both are present.

use std::collections::BTreeMap;

use payform_core::Email;
use serde::{Deserialize, Serialize};

/// Which party an address belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    Billing,
    Delivery,
}

impl AddressKind {
    /// Key prefix for this party, lower-case first letter.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Billing => "billing",
            Self::Delivery => "delivery",
        }
    }
}

/// The nine canonical customer fields, in provider order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Firstnames,
    Surname,
    Address1,
    Address2,
    City,
    PostCode,
    Country,
    State,
    Phone,
}

impl CustomerField {
    /// Every canonical field.
    pub const ALL: [Self; 9] = [
        Self::Firstnames,
        Self::Surname,
        Self::Address1,
        Self::Address2,
        Self::City,
        Self::PostCode,
        Self::Country,
        Self::State,
        Self::Phone,
    ];

    /// Base name appended to the party prefix.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Firstnames => "Firstnames",
            Self::Surname => "Surname",
            Self::Address1 => "Address1",
            Self::Address2 => "Address2",
            Self::City => "City",
            Self::PostCode => "PostCode",
            Self::Country => "Country",
            Self::State => "State",
            Self::Phone => "Phone",
        }
    }

    /// Prefixed key with a lower-case first letter, e.g. `billingCity`.
    #[must_use]
    pub fn key(self, kind: AddressKind) -> String {
        format!("{}{}", kind.prefix(), self.suffix())
    }

    /// Prefixed key as the provider spells it, e.g. `BillingCity`.
    #[must_use]
    pub fn provider_key(self, kind: AddressKind) -> String {
        upper_first(&self.key(kind))
    }
}

fn upper_first(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Address as exported by the commerce backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default)]
    pub given_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub administrative_area: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Only meaningful on billing profiles.
    #[serde(default, deserialize_with = "payform_core::types::email::deserialize_optional")]
    pub email: Option<Email>,
}

impl AddressRecord {
    /// Render the record into the keyed form for `kind`.
    ///
    /// The eight address fields are always emitted, even when empty; the
    /// phone only when the record has one. Email is not part of the keyed
    /// form.
    #[must_use]
    pub fn to_fields(&self, kind: AddressKind) -> AddressFields {
        let mut fields = AddressFields::new();
        let values = [
            (CustomerField::Firstnames, &self.given_name),
            (CustomerField::Surname, &self.family_name),
            (CustomerField::Address1, &self.address_line1),
            (CustomerField::Address2, &self.address_line2),
            (CustomerField::City, &self.locality),
            (CustomerField::PostCode, &self.postal_code),
            (CustomerField::Country, &self.country_code),
            (CustomerField::State, &self.administrative_area),
        ];
        for (field, value) in values {
            fields.insert(field.key(kind), value.clone());
        }
        if let Some(phone) = &self.phone {
            fields.insert(CustomerField::Phone.key(kind), phone.clone());
        }
        fields
    }
}

/// Keyed address data in the provider's prefixed convention.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressFields(BTreeMap<String, String>);

impl AddressFields {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AddressFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Customer details for one party, as the provider expects them.
///
/// Unset fields are `None` and are skipped on serialization; a field that
/// was present but empty in the source stays `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "payform_core::types::email::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Email>,
}

impl CustomerDetails {
    /// Value of a canonical field.
    #[must_use]
    pub fn get(&self, field: CustomerField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    const fn slot(&self, field: CustomerField) -> &Option<String> {
        match field {
            CustomerField::Firstnames => &self.firstname,
            CustomerField::Surname => &self.lastname,
            CustomerField::Address1 => &self.address1,
            CustomerField::Address2 => &self.address2,
            CustomerField::City => &self.city,
            CustomerField::PostCode => &self.postcode,
            CustomerField::Country => &self.country,
            CustomerField::State => &self.state,
            CustomerField::Phone => &self.phone,
        }
    }

    const fn slot_mut(&mut self, field: CustomerField) -> &mut Option<String> {
        match field {
            CustomerField::Firstnames => &mut self.firstname,
            CustomerField::Surname => &mut self.lastname,
            CustomerField::Address1 => &mut self.address1,
            CustomerField::Address2 => &mut self.address2,
            CustomerField::City => &mut self.city,
            CustomerField::PostCode => &mut self.postcode,
            CustomerField::Country => &mut self.country,
            CustomerField::State => &mut self.state,
            CustomerField::Phone => &mut self.phone,
        }
    }

    /// True when no field at all is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && CustomerField::ALL.iter().all(|f| self.slot(*f).is_none())
    }

    /// Render back into the provider's flat key/value form for `kind`.
    ///
    /// Unset fields are omitted. The email goes out as `CustomerEMail` and
    /// only for the billing party.
    #[must_use]
    pub fn to_provider_fields(&self, kind: AddressKind) -> BTreeMap<String, String> {
        let mut out: BTreeMap<String, String> = CustomerField::ALL
            .iter()
            .filter_map(|field| {
                self.get(*field)
                    .map(|value| (field.provider_key(kind), value.to_owned()))
            })
            .collect();
        if kind == AddressKind::Billing {
            if let Some(email) = &self.email {
                out.insert("CustomerEMail".to_owned(), email.as_str().to_owned());
            }
        }
        out
    }
}

/// Map keyed address data for one party into [`CustomerDetails`].
///
/// `email` is applied only when `kind` is [`AddressKind::Billing`]; it
/// replaces whatever email the details held.
#[must_use]
pub fn map_address(
    fields: &AddressFields,
    kind: AddressKind,
    email: Option<&Email>,
) -> CustomerDetails {
    let mut details = CustomerDetails::default();

    for field in CustomerField::ALL {
        let key = field.key(kind);
        if let Some(value) = fields.get(&key) {
            *details.slot_mut(field) = Some(value.to_owned());
        }
        // Upper-case variant is read second and overwrites.
        if let Some(value) = fields.get(&upper_first(&key)) {
            *details.slot_mut(field) = Some(value.to_owned());
        }
    }

    if kind == AddressKind::Billing {
        if let Some(email) = email {
            details.email = Some(email.clone());
        }
    }

    details
}

/// Map an [`AddressRecord`] for one party.
#[must_use]
pub fn map_record(
    record: &AddressRecord,
    kind: AddressKind,
    email: Option<&Email>,
) -> CustomerDetails {
    map_address(&record.to_fields(kind), kind, email)
}

/// Map the shipping profile, if there is one, into delivery details.
///
/// An order without a shipping profile has no delivery details at all,
/// which is different from delivery details with every field unset.
#[must_use]
pub fn map_delivery(shipping: Option<&AddressRecord>) -> Option<CustomerDetails> {
    shipping.map(|record| map_record(record, AddressKind::Delivery, None))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> AddressRecord {
        AddressRecord {
            given_name: "Jo".to_owned(),
            family_name: "Bloggs".to_owned(),
            address_line1: "1 High Street".to_owned(),
            address_line2: String::new(),
            locality: "Bristol".to_owned(),
            postal_code: "BS1 4DJ".to_owned(),
            country_code: "GB".to_owned(),
            administrative_area: String::new(),
            phone: None,
            email: None,
        }
    }

    fn email() -> Email {
        Email::parse("jo@example.com").unwrap()
    }

    #[test]
    fn test_keys_are_prefixed_by_kind() {
        assert_eq!(
            CustomerField::Firstnames.key(AddressKind::Billing),
            "billingFirstnames"
        );
        assert_eq!(
            CustomerField::Address1.key(AddressKind::Delivery),
            "deliveryAddress1"
        );
        assert_eq!(
            CustomerField::PostCode.provider_key(AddressKind::Delivery),
            "DeliveryPostCode"
        );
    }

    #[test]
    fn test_map_record_billing() {
        let details = map_record(&record(), AddressKind::Billing, Some(&email()));

        assert_eq!(details.firstname.as_deref(), Some("Jo"));
        assert_eq!(details.lastname.as_deref(), Some("Bloggs"));
        assert_eq!(details.address1.as_deref(), Some("1 High Street"));
        assert_eq!(details.address2.as_deref(), Some(""));
        assert_eq!(details.city.as_deref(), Some("Bristol"));
        assert_eq!(details.postcode.as_deref(), Some("BS1 4DJ"));
        assert_eq!(details.country.as_deref(), Some("GB"));
        assert_eq!(details.state.as_deref(), Some(""));
        assert_eq!(details.phone, None);
        assert_eq!(details.email, Some(email()));
    }

    #[test]
    fn test_email_ignored_for_delivery() {
        let details = map_record(&record(), AddressKind::Delivery, Some(&email()));
        assert_eq!(details.email, None);
        assert_eq!(details.firstname.as_deref(), Some("Jo"));
    }

    #[test]
    fn test_upper_case_key_takes_precedence() {
        let fields: AddressFields = [("billingCity", "A"), ("BillingCity", "B")]
            .into_iter()
            .collect();

        let details = map_address(&fields, AddressKind::Billing, None);
        assert_eq!(details.city.as_deref(), Some("B"));
    }

    #[test]
    fn test_upper_case_key_alone_is_read() {
        let fields: AddressFields = [("DeliverySurname", "Bloggs")].into_iter().collect();

        let details = map_address(&fields, AddressKind::Delivery, None);
        assert_eq!(details.lastname.as_deref(), Some("Bloggs"));
    }

    #[test]
    fn test_other_party_and_unknown_keys_are_ignored() {
        let fields: AddressFields = [
            ("deliveryCity", "Leeds"),
            ("billingNickname", "JB"),
            ("billingEmail", "x@example.com"),
        ]
        .into_iter()
        .collect();

        let details = map_address(&fields, AddressKind::Billing, None);
        assert!(details.is_empty());
    }

    #[test]
    fn test_missing_fields_stay_unset_and_are_not_serialized() {
        let fields: AddressFields = [("billingSurname", "Bloggs")].into_iter().collect();
        let details = map_address(&fields, AddressKind::Billing, None);

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json, serde_json::json!({ "lastname": "Bloggs" }));
    }

    #[test]
    fn test_phone_emitted_only_when_present() {
        let mut with_phone = record();
        with_phone.phone = Some("0117 496 0000".to_owned());

        assert!(record().to_fields(AddressKind::Billing).get("billingPhone").is_none());
        assert_eq!(
            with_phone
                .to_fields(AddressKind::Billing)
                .get("billingPhone"),
            Some("0117 496 0000")
        );
    }

    #[test]
    fn test_map_delivery_without_shipping_is_absent() {
        assert_eq!(map_delivery(None), None);

        let details = map_delivery(Some(&record())).unwrap();
        assert_eq!(details.city.as_deref(), Some("Bristol"));
        assert_eq!(details.email, None);
    }

    #[test]
    fn test_to_provider_fields() {
        let details = map_record(&record(), AddressKind::Billing, Some(&email()));
        let fields = details.to_provider_fields(AddressKind::Billing);

        assert_eq!(fields.get("BillingFirstnames").map(String::as_str), Some("Jo"));
        assert_eq!(fields.get("BillingPostCode").map(String::as_str), Some("BS1 4DJ"));
        assert_eq!(
            fields.get("CustomerEMail").map(String::as_str),
            Some("jo@example.com")
        );
        assert!(!fields.contains_key("BillingPhone"));

        let delivery = details.to_provider_fields(AddressKind::Delivery);
        assert!(delivery.contains_key("DeliveryCity"));
        assert!(!delivery.contains_key("CustomerEMail"));
    }
}
