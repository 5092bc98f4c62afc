use serde::{Deserialize, Serialize};
use std::fmt;

// Vehicle-related enums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyStyle {
    #[default]
    Sedan,
    Hatchback,
    Suv,
    Coupe,
    Convertible,
    Wagon,
    Pickup,
    Van,
}

impl fmt::Display for BodyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyStyle::Sedan => write!(f, "sedan"),
            BodyStyle::Hatchback => write!(f, "hatchback"),
            BodyStyle::Suv => write!(f, "suv"),
            BodyStyle::Coupe => write!(f, "coupe"),
            BodyStyle::Convertible => write!(f, "convertible"),
            BodyStyle::Wagon => write!(f, "wagon"),
            BodyStyle::Pickup => write!(f, "pickup"),
            BodyStyle::Van => write!(f, "van"),
        }
    }
}

impl BodyStyle {
    /// Lenient parse for loosely-typed stored documents. Unknown labels
    /// fall back to the default rather than failing the whole record.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "sedan" => BodyStyle::Sedan,
            "hatchback" => BodyStyle::Hatchback,
            "suv" => BodyStyle::Suv,
            "coupe" => BodyStyle::Coupe,
            "convertible" | "cabrio" => BodyStyle::Convertible,
            "wagon" | "break" | "estate" => BodyStyle::Wagon,
            "pickup" => BodyStyle::Pickup,
            "van" | "minivan" => BodyStyle::Van,
            _ => BodyStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    #[default]
    Manual,
    Automatic,
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transmission::Manual => write!(f, "manual"),
            Transmission::Automatic => write!(f, "automatic"),
        }
    }
}

impl Transmission {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "automatic" | "automata" | "auto" => Transmission::Automatic,
            _ => Transmission::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    #[default]
    Petrol,
    Diesel,
    Hybrid,
    Electric,
    Lpg,
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Petrol => write!(f, "petrol"),
            FuelType::Diesel => write!(f, "diesel"),
            FuelType::Hybrid => write!(f, "hybrid"),
            FuelType::Electric => write!(f, "electric"),
            FuelType::Lpg => write!(f, "lpg"),
        }
    }
}

impl FuelType {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "petrol" | "benzina" | "gasoline" => FuelType::Petrol,
            "diesel" | "motorina" => FuelType::Diesel,
            "hybrid" | "hibrid" => FuelType::Hybrid,
            "electric" => FuelType::Electric,
            "lpg" | "gpl" => FuelType::Lpg,
            _ => FuelType::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Drivetrain {
    #[default]
    Fwd,
    Rwd,
    Awd,
}

impl fmt::Display for Drivetrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drivetrain::Fwd => write!(f, "fwd"),
            Drivetrain::Rwd => write!(f, "rwd"),
            Drivetrain::Awd => write!(f, "awd"),
        }
    }
}

impl Drivetrain {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "rwd" | "spate" => Drivetrain::Rwd,
            "awd" | "4x4" | "4wd" | "integrala" => Drivetrain::Awd,
            _ => Drivetrain::default(),
        }
    }
}

// Listing sort orders supported by the search surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSort {
    PriceAsc,
    PriceDesc,
}

impl fmt::Display for PriceSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceSort::PriceAsc => write!(f, "price_asc"),
            PriceSort::PriceDesc => write!(f, "price_desc"),
        }
    }
}
