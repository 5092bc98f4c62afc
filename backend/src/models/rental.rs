use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use showroom_platform_shared::{
    BodyStyle, Drivetrain, FuelType, RentalPayload, RentalResponse, Transmission,
};

use super::{i32_field, i64_field, str_field, string_list_field};
use crate::store::Document;

/// A car-for-rent listing. Pricing is free text, one or more comma-separated
/// "days: price-per-day" intervals, and is never validated numerically.
#[derive(Debug, Clone)]
pub struct Rental {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price_text: String,
    pub mileage_km: i64,
    pub body_style: BodyStyle,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub drivetrain: Drivetrain,
    pub engine_cc: i32,
    pub power_hp: i32,
    pub description: String,
    pub features: String,
    pub contact: String,
    pub location: String,
    pub images: Vec<String>,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn from_document(doc: &Document) -> Self {
        let fields = &doc.fields;
        let mut rental = Self {
            id: doc.id.clone(),
            title: str_field(fields, "title"),
            brand: str_field(fields, "brand"),
            model: str_field(fields, "model"),
            year: i32_field(fields, "year"),
            price_text: str_field(fields, "price_text"),
            mileage_km: i64_field(fields, "mileage_km"),
            body_style: BodyStyle::from_label(&str_field(fields, "body_style")),
            transmission: Transmission::from_label(&str_field(fields, "transmission")),
            fuel_type: FuelType::from_label(&str_field(fields, "fuel_type")),
            drivetrain: Drivetrain::from_label(&str_field(fields, "drivetrain")),
            engine_cc: i32_field(fields, "engine_cc"),
            power_hp: i32_field(fields, "power_hp"),
            description: str_field(fields, "description"),
            features: str_field(fields, "features"),
            contact: str_field(fields, "contact"),
            location: str_field(fields, "location"),
            images: string_list_field(fields, "images"),
            cover_image: str_field(fields, "cover_image"),
            created_at: doc.created_at,
        };
        rental.normalize_cover();
        rental
    }

    pub fn from_payload(
        id: String,
        payload: &RentalPayload,
        images: Vec<String>,
        cover_image: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut rental = Self {
            id,
            title: payload.title.clone(),
            brand: payload.brand.clone(),
            model: payload.model.clone(),
            year: payload.year,
            price_text: payload.price_text.clone(),
            mileage_km: payload.mileage_km,
            body_style: payload.body_style,
            transmission: payload.transmission,
            fuel_type: payload.fuel_type,
            drivetrain: payload.drivetrain,
            engine_cc: payload.engine_cc,
            power_hp: payload.power_hp,
            description: payload.description.clone(),
            features: payload.features.clone(),
            contact: payload.contact.clone(),
            location: payload.location.clone(),
            images,
            cover_image,
            created_at,
        };
        rental.normalize_cover();
        rental
    }

    pub fn normalize_cover(&mut self) {
        if self.images.is_empty() {
            self.cover_image.clear();
        } else if !self.images.contains(&self.cover_image) {
            self.cover_image = self.images[0].clone();
        }
    }

    /// Representative per-day price used for sorting and range filters.
    pub fn price_per_day(&self) -> i64 {
        extract_interval_price(&self.price_text)
    }

    pub fn to_fields(&self) -> Value {
        json!({
            "title": self.title,
            "brand": self.brand,
            "model": self.model,
            "year": self.year,
            "price_text": self.price_text,
            "mileage_km": self.mileage_km,
            "body_style": self.body_style.to_string(),
            "transmission": self.transmission.to_string(),
            "fuel_type": self.fuel_type.to_string(),
            "drivetrain": self.drivetrain.to_string(),
            "engine_cc": self.engine_cc,
            "power_hp": self.power_hp,
            "description": self.description,
            "features": self.features,
            "contact": self.contact,
            "location": self.location,
            "images": self.images,
            "cover_image": self.cover_image,
        })
    }

    pub fn to_response(&self) -> RentalResponse {
        RentalResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            price_text: self.price_text.clone(),
            price_per_day: self.price_per_day(),
            mileage_km: self.mileage_km,
            body_style: self.body_style,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            drivetrain: self.drivetrain,
            engine_cc: self.engine_cc,
            power_hp: self.power_hp,
            description: self.description.clone(),
            features: self.features.clone(),
            contact: self.contact.clone(),
            location: self.location.clone(),
            images: self.images.clone(),
            cover_image: self.cover_image.clone(),
            created_at: self.created_at,
        }
    }
}

/// Extract a representative numeric price from an interval string.
///
/// The first interval is the substring before the first comma; within it,
/// the last integer token before a currency symbol wins. When nothing
/// matches the interval syntax, the first integer anywhere in the string is
/// used, and 0 when there is none at all.
pub fn extract_interval_price(text: &str) -> i64 {
    let head = text.split(',').next().unwrap_or_default();
    if let Some(symbol_at) = head.find(['€', '$']) {
        let before_symbol = &head[..symbol_at];
        if let Some(token) = integer_tokens(before_symbol).last() {
            return token;
        }
    }
    integer_tokens(text).next().unwrap_or(0)
}

fn integer_tokens(text: &str) -> impl Iterator<Item = i64> + '_ {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_string_takes_price_before_currency_symbol() {
        assert_eq!(extract_interval_price("3 zile: 100 €/zi, 7 zile: 80 €/zi"), 100);
    }

    #[test]
    fn plain_number_is_taken_as_is() {
        assert_eq!(extract_interval_price("250"), 250);
    }

    #[test]
    fn unparseable_text_falls_back_to_zero() {
        assert_eq!(extract_interval_price("la cerere"), 0);
        assert_eq!(extract_interval_price(""), 0);
    }

    #[test]
    fn symbol_without_leading_number_uses_first_integer_anywhere() {
        assert_eq!(extract_interval_price("€ negociabil, 5 zile: 90"), 5);
    }

    #[test]
    fn dollar_intervals_also_parse() {
        assert_eq!(extract_interval_price("2 days: 45 $/day, 10 days: 35 $/day"), 45);
    }

    #[test]
    fn rental_cover_invariant_holds_after_parse() {
        use crate::store::Document;
        use chrono::Utc;
        use serde_json::json;

        let rental = Rental::from_document(&Document {
            id: "r1".to_string(),
            created_at: Utc::now(),
            fields: json!({
                "title": "Logan",
                "images": ["one.jpg"],
                "cover_image": "never-uploaded.jpg",
            }),
        });
        assert_eq!(rental.cover_image, "one.jpg");
    }
}
