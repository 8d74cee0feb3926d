//! Human-readable labels for the `x1..x55` indicator columns.
//!
//! The dataset ships with terse column identifiers. Responses replace them
//! with a label in the caller's language. The table is a literal constant and
//! is never mutated.
//!
//! # Example
//!
//! ```rust,ignore
//! use costliving::labels::{IndicatorKey, Language};
//!
//! let key = IndicatorKey::parse("x1").unwrap();
//! assert_eq!(key.label(Language::En), "Meal, Inexpensive Restaurant (USD)");
//! ```

pub mod language;

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

pub use language::Language;

/// Number of indicator columns in the dataset.
pub const INDICATOR_COUNT: u8 = 55;

/// `(en, de)` labels, indexed by `key - 1`.
const LABELS: [(&str, &str); INDICATOR_COUNT as usize] = [
    ("Meal, Inexpensive Restaurant (USD)", "Mahlzeit, günstiges Restaurant (USD)"),
    ("Meal for 2 People, Mid-range Restaurant, Three-course (USD)", "Drei-Gänge-Menü für 2 Personen, Restaurant der Mittelklasse (USD)"),
    ("McMeal at McDonalds (or Equivalent Combo Meal) (USD)", "McMenü bei McDonalds (oder vergleichbares Menü) (USD)"),
    ("Domestic Beer (1 pint draught) (USD)", "Einheimisches Bier (1 Pint vom Fass) (USD)"),
    ("Imported Beer (12 oz small bottle) (USD)", "Importiertes Bier (kleine Flasche, 12 oz) (USD)"),
    ("Cappuccino (regular) (USD)", "Cappuccino (normal) (USD)"),
    ("Coke/Pepsi (12 oz small bottle) (USD)", "Cola/Pepsi (kleine Flasche, 12 oz) (USD)"),
    ("Water (12 oz small bottle) (USD)", "Wasser (kleine Flasche, 12 oz) (USD)"),
    ("Milk (regular), (1 gallon) (USD)", "Milch (normal), (1 Gallone) (USD)"),
    ("Loaf of Fresh White Bread (1 lb) (USD)", "Frisches Weißbrot (1 lb) (USD)"),
    ("Rice (white), (1 lb) (USD)", "Reis (weiß), (1 lb) (USD)"),
    ("Eggs (regular) (12) (USD)", "Eier (normal) (12 Stück) (USD)"),
    ("Local Cheese (1 lb) (USD)", "Einheimischer Käse (1 lb) (USD)"),
    ("Chicken Fillets (1 lb) (USD)", "Hähnchenfilet (1 lb) (USD)"),
    ("Beef Round (1 lb) (or Equivalent Back Leg Red Meat) (USD)", "Rinderkeule (1 lb) (oder vergleichbares rotes Fleisch) (USD)"),
    ("Apples (1 lb) (USD)", "Äpfel (1 lb) (USD)"),
    ("Banana (1 lb) (USD)", "Bananen (1 lb) (USD)"),
    ("Oranges (1 lb) (USD)", "Orangen (1 lb) (USD)"),
    ("Tomato (1 lb) (USD)", "Tomaten (1 lb) (USD)"),
    ("Potato (1 lb) (USD)", "Kartoffeln (1 lb) (USD)"),
    ("Onion (1 lb) (USD)", "Zwiebeln (1 lb) (USD)"),
    ("Lettuce (1 head) (USD)", "Kopfsalat (1 Kopf) (USD)"),
    ("Water (1.5 liter bottle) (USD)", "Wasser (1,5-Liter-Flasche) (USD)"),
    ("Bottle of Wine (Mid-Range) (USD)", "Flasche Wein (Mittelklasse) (USD)"),
    ("Domestic Beer (0.5 liter bottle) (USD)", "Einheimisches Bier (0,5-Liter-Flasche) (USD)"),
    ("Imported Beer (12 oz small bottle), Market (USD)", "Importiertes Bier (kleine Flasche, 12 oz), Supermarkt (USD)"),
    ("Cigarettes 20 Pack (Marlboro) (USD)", "Zigaretten, 20er-Packung (Marlboro) (USD)"),
    ("One-way Ticket (Local Transport) (USD)", "Einzelfahrschein (Nahverkehr) (USD)"),
    ("Monthly Pass (Regular Price) (USD)", "Monatskarte (Normalpreis) (USD)"),
    ("Taxi Start (Normal Tariff) (USD)", "Taxi Grundgebühr (Normaltarif) (USD)"),
    ("Taxi 1 mile (Normal Tariff) (USD)", "Taxi 1 Meile (Normaltarif) (USD)"),
    ("Taxi 1 hour Waiting (Normal Tariff) (USD)", "Taxi 1 Stunde Wartezeit (Normaltarif) (USD)"),
    ("Gasoline (1 gallon) (USD)", "Benzin (1 Gallone) (USD)"),
    ("Volkswagen Golf 1.4 90 KW Trendline (Or Equivalent New Car) (USD)", "Volkswagen Golf 1.4 90 KW Trendline (oder vergleichbarer Neuwagen) (USD)"),
    ("Toyota Corolla Sedan 1.6l 97kW Comfort (Or Equivalent New Car) (USD)", "Toyota Corolla Limousine 1.6l 97kW Comfort (oder vergleichbarer Neuwagen) (USD)"),
    ("Basic (Electricity, Heating, Cooling, Water, Garbage) for 915 sq ft Apartment (USD)", "Nebenkosten (Strom, Heizung, Kühlung, Wasser, Müll) für 85 m² Wohnung (USD)"),
    ("Mobile Phone Monthly Plan with Calls and 10GB+ Data (USD)", "Handyvertrag monatlich mit Telefonie und 10 GB+ Daten (USD)"),
    ("Internet (60 Mbps or More, Unlimited Data, Cable/ADSL) (USD)", "Internet (60 Mbit/s oder mehr, unbegrenzte Daten, Kabel/ADSL) (USD)"),
    ("Fitness Club, Monthly Fee for 1 Adult (USD)", "Fitnessstudio, Monatsbeitrag für 1 Erwachsenen (USD)"),
    ("Tennis Court Rent (1 Hour on Weekend) (USD)", "Tennisplatzmiete (1 Stunde am Wochenende) (USD)"),
    ("Cinema, International Release, 1 Seat (USD)", "Kino, internationaler Film, 1 Platz (USD)"),
    ("Preschool (or Kindergarten), Full Day, Private, Monthly for 1 Child (USD)", "Vorschule (oder Kindergarten), ganztags, privat, monatlich für 1 Kind (USD)"),
    ("International Primary School, Yearly for 1 Child (USD)", "Internationale Grundschule, jährlich für 1 Kind (USD)"),
    ("1 Pair of Jeans (Levis 501 Or Similar) (USD)", "1 Jeans (Levis 501 oder vergleichbar) (USD)"),
    ("1 Summer Dress in a Chain Store (Zara, H&M, ...) (USD)", "1 Sommerkleid in einer Ladenkette (Zara, H&M, ...) (USD)"),
    ("1 Pair of Nike Running Shoes (Mid-Range) (USD)", "1 Paar Nike Laufschuhe (Mittelklasse) (USD)"),
    ("1 Pair of Men Leather Business Shoes (USD)", "1 Paar Business-Lederschuhe für Herren (USD)"),
    ("Apartment (1 bedroom) in City Centre (USD)", "Wohnung (1 Schlafzimmer) im Stadtzentrum (USD)"),
    ("Apartment (1 bedroom) Outside of Centre (USD)", "Wohnung (1 Schlafzimmer) außerhalb des Zentrums (USD)"),
    ("Apartment (3 bedrooms) in City Centre (USD)", "Wohnung (3 Schlafzimmer) im Stadtzentrum (USD)"),
    ("Apartment (3 bedrooms) Outside of Centre (USD)", "Wohnung (3 Schlafzimmer) außerhalb des Zentrums (USD)"),
    ("Price per Square Feet to Buy Apartment in City Centre (USD)", "Kaufpreis pro Quadratfuß für eine Wohnung im Stadtzentrum (USD)"),
    ("Price per Square Feet to Buy Apartment Outside of Centre (USD)", "Kaufpreis pro Quadratfuß für eine Wohnung außerhalb des Zentrums (USD)"),
    ("Average Monthly Net Salary (After Tax) (USD)", "Durchschnittliches monatliches Nettogehalt (nach Steuern) (USD)"),
    ("Mortgage Interest Rate in Percentages (%), Yearly, for 20 Years Fixed-Rate", "Hypothekenzins in Prozent (%), jährlich, 20 Jahre Zinsbindung"),
];

static INDICATOR_COLUMN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^x([1-9][0-9]?)$").expect("indicator column pattern is valid")
});

/// Identifier of one indicator column, `x1` through `x55`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndicatorKey(u8);

impl IndicatorKey {
    /// Build a key from its 1-based number.
    pub fn new(number: u8) -> Option<Self> {
        (1..=INDICATOR_COUNT).contains(&number).then_some(Self(number))
    }

    /// Parse a column header such as `x12`.
    ///
    /// Headers outside `x1..x55` are not indicators and yield `None`.
    pub fn parse(column: &str) -> Option<Self> {
        let caps = INDICATOR_COLUMN.captures(column.trim())?;
        caps[1].parse().ok().and_then(Self::new)
    }

    /// Iterate all keys in column order.
    pub fn all() -> impl Iterator<Item = IndicatorKey> {
        (1..=INDICATOR_COUNT).map(Self)
    }

    /// Label of this indicator in the given language.
    pub fn label(self, language: Language) -> &'static str {
        let (en, de) = LABELS[(self.0 - 1) as usize];
        match language {
            Language::En => en,
            Language::De => de,
        }
    }
}

impl fmt::Display for IndicatorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

impl Serialize for IndicatorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Reverse lookup: which indicator carries this label in `language`.
pub fn key_for_label(label: &str, language: Language) -> Option<IndicatorKey> {
    IndicatorKey::all().find(|key| key.label(language) == label)
}

/// Full `x1..x55` → label map for one language, in column order.
pub fn label_table(language: Language) -> BTreeMap<IndicatorKey, &'static str> {
    IndicatorKey::all()
        .map(|key| (key, key.label(language)))
        .collect()
}
