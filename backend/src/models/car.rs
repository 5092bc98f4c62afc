use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use showroom_platform_shared::{BodyStyle, CarPayload, CarResponse, FuelType, Transmission};

use super::{decimal_field, i32_field, i64_field, str_field, string_list_field};
use crate::store::Document;

/// A car-for-sale listing.
#[derive(Debug, Clone)]
pub struct Car {
    pub id: String,
    pub title: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage_km: i64,
    pub body_style: BodyStyle,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
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

impl Car {
    pub fn from_document(doc: &Document) -> Self {
        let fields = &doc.fields;
        let mut car = Self {
            id: doc.id.clone(),
            title: str_field(fields, "title"),
            brand: str_field(fields, "brand"),
            model: str_field(fields, "model"),
            year: i32_field(fields, "year"),
            price: decimal_field(fields, "price"),
            mileage_km: i64_field(fields, "mileage_km"),
            body_style: BodyStyle::from_label(&str_field(fields, "body_style")),
            transmission: Transmission::from_label(&str_field(fields, "transmission")),
            fuel_type: FuelType::from_label(&str_field(fields, "fuel_type")),
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
        car.normalize_cover();
        car
    }

    pub fn from_payload(
        id: String,
        payload: &CarPayload,
        images: Vec<String>,
        cover_image: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut car = Self {
            id,
            title: payload.title.clone(),
            brand: payload.brand.clone(),
            model: payload.model.clone(),
            year: payload.year,
            price: payload.price,
            mileage_km: payload.mileage_km,
            body_style: payload.body_style,
            transmission: payload.transmission,
            fuel_type: payload.fuel_type,
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
        car.normalize_cover();
        car
    }

    /// Cover invariant: member of `images`, or empty when there are none.
    pub fn normalize_cover(&mut self) {
        if self.images.is_empty() {
            self.cover_image.clear();
        } else if !self.images.contains(&self.cover_image) {
            self.cover_image = self.images[0].clone();
        }
    }

    pub fn to_fields(&self) -> Value {
        json!({
            "title": self.title,
            "brand": self.brand,
            "model": self.model,
            "year": self.year,
            "price": self.price,
            "mileage_km": self.mileage_km,
            "body_style": self.body_style.to_string(),
            "transmission": self.transmission.to_string(),
            "fuel_type": self.fuel_type.to_string(),
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

    pub fn to_response(&self) -> CarResponse {
        CarResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            price: self.price,
            mileage_km: self.mileage_km,
            body_style: self.body_style,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
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
