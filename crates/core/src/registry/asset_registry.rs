use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeSet, HashMap};

use super::registry_model::{AssetClassTag, AssetDefinition, RegistryEntry};
use crate::constants::{BASE_CURRENCY, GRAMS_TO_TROY_OUNCES};
use crate::errors::{Error, Result};

/// Holding field → metadata table.
///
/// Built once at start-up and shared read-only between requests. `lookup`
/// is total: fields without an entry resolve to [`RegistryEntry::fallback`].
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    entries: HashMap<String, RegistryEntry>,
    fallback: RegistryEntry,
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetRegistry {
    /// Create a registry with the built-in holding fields.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.load_defaults();
        registry
    }

    /// Create a registry that knows no fields at all.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            fallback: RegistryEntry::fallback(),
        }
    }

    /// Build a registry from configured definitions, replacing the defaults.
    pub fn from_definitions(definitions: Vec<AssetDefinition>) -> Result<Self> {
        let mut registry = Self::empty();
        for definition in definitions {
            definition.validate()?;
            let (field, entry) = definition.into_entry();
            if registry.entries.insert(field.clone(), entry).is_some() {
                return Err(Error::InvalidConfigValue(format!(
                    "Asset field '{}' is defined twice",
                    field
                )));
            }
        }
        debug!("Asset registry loaded with {} fields", registry.len());
        Ok(registry)
    }

    /// Load all default holding fields.
    fn load_defaults(&mut self) {
        // ===== Precious metals (priced in troy ounces) =====
        self.add("gold_g", "XAU", false, GRAMS_TO_TROY_OUNCES, dec!(5), "Gold (g)", Some(AssetClassTag::Gold));
        self.add("gold_oz", "XAU", false, Decimal::ONE, dec!(5), "Gold (oz)", Some(AssetClassTag::Gold));

        // ===== Volatile reference asset and its equity proxy =====
        self.add("btc", "BTC", false, Decimal::ONE, dec!(10), "Bitcoin", Some(AssetClassTag::VolatileReference));
        self.add(
            "btc_stock_usd",
            BASE_CURRENCY,
            false,
            Decimal::ONE,
            dec!(10),
            "Bitcoin-linked equities (USD)",
            Some(AssetClassTag::VolatileReference),
        );

        // ===== Equities =====
        self.add("stock_usd", BASE_CURRENCY, false, Decimal::ONE, dec!(8), "Stocks (USD)", None);

        // ===== Cash savings (liquid) =====
        self.add("savings_usd", BASE_CURRENCY, true, Decimal::ONE, dec!(0.5), "Savings (USD)", None);
        self.add("savings_cny", "CNY", true, Decimal::ONE, dec!(0.5), "Savings (CNY)", None);
        self.add("savings_eur", "EUR", true, Decimal::ONE, dec!(0.5), "Savings (EUR)", None);
        self.add("savings_sgd", "SGD", true, Decimal::ONE, dec!(0.5), "Savings (SGD)", None);
        self.add("savings_hkd", "HKD", true, Decimal::ONE, dec!(0.5), "Savings (HKD)", None);

        // ===== Term deposits =====
        self.add("deposit_gbp", "GBP", false, Decimal::ONE, dec!(0.5), "Deposit (GBP)", None);

        // ===== Policy-backed accounts =====
        self.add("housing_fund_cny", "CNY", false, Decimal::ONE, dec!(1), "Housing fund (CNY)", None);
        self.add("retirement_funds_cny", "CNY", false, Decimal::ONE, dec!(1), "Retirement funds (CNY)", None);

        // ===== Mixed funds =====
        self.add("funds_cny", "CNY", false, Decimal::ONE, dec!(4), "Funds (CNY)", None);
        self.add("funds_eur", "EUR", false, Decimal::ONE, dec!(4), "Funds (EUR)", None);
        self.add("funds_sgd", "SGD", false, Decimal::ONE, dec!(4), "Funds (SGD)", None);
        self.add("funds_hkd", "HKD", false, Decimal::ONE, dec!(4), "Funds (HKD)", None);
    }

    #[allow(clippy::too_many_arguments)]
    fn add(
        &mut self,
        field: &str,
        currency: &str,
        liquid: bool,
        unit_scale: Decimal,
        risk_weight: Decimal,
        display_name: &str,
        class: Option<AssetClassTag>,
    ) {
        self.entries.insert(
            field.to_string(),
            RegistryEntry {
                currency: currency.to_string(),
                liquid,
                unit_scale,
                risk_weight,
                display_name: display_name.to_string(),
                class,
            },
        );
    }

    /// Metadata for `field`, or the fallback entry for unknown fields.
    pub fn lookup(&self, field: &str) -> &RegistryEntry {
        self.entries.get(field).unwrap_or(&self.fallback)
    }

    /// Metadata for `field` only if it is explicitly configured.
    pub fn get(&self, field: &str) -> Option<&RegistryEntry> {
        self.entries.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Human readable name, falling back to the field name itself.
    pub fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        match self.entries.get(field) {
            Some(entry) if !entry.display_name.is_empty() => &entry.display_name,
            _ => field,
        }
    }

    /// Settlement currencies of gold and volatile-reference entries.
    ///
    /// The base currency is excluded: an equity proxy settled in USD does not
    /// turn USD into a non-fiat asset class.
    pub fn non_fiat_currencies(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .filter(|entry| entry.class.is_some() && entry.currency != BASE_CURRENCY)
            .map(|entry| entry.currency.clone())
            .collect()
    }

    /// All configured field names, sorted.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        fields.sort_unstable();
        fields
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
