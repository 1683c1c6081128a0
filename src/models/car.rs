use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog entry. Wire field names follow the original platform API
/// (mixed Turkish/English), column names are snake_case.
///
/// `average_rating` and `review_count` are derived from the review set and
/// are never accepted from clients; see `CarCreate`/`CarUpdate`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Car {
    #[serde(rename = "CarID")]
    pub car_id: String,
    #[serde(rename = "ArabaMarka")]
    pub make: String,
    #[serde(rename = "CarModel")]
    pub model: String,
    #[serde(rename = "CarPack")]
    pub pack: String,
    #[serde(rename = "CarYear")]
    pub year: i32,
    #[serde(rename = "CarFuelType")]
    pub fuel_type: String,
    #[serde(rename = "CarEngineCapacity")]
    pub engine_capacity: i32,
    #[serde(rename = "CarHorsePower")]
    pub horse_power: i32,
    #[serde(rename = "CarType")]
    pub body_type: String,
    #[serde(rename = "CarTopSpeed")]
    pub top_speed: i32,
    #[serde(rename = "CarAcceleration")]
    pub acceleration: f64,
    #[serde(rename = "CarTransmission")]
    pub transmission: String,
    #[serde(rename = "CarEconomy")]
    pub economy: f64,
    #[serde(rename = "CarWeight")]
    pub weight: i32,
    #[serde(rename = "CarHeight")]
    pub height: i32,
    #[serde(rename = "CarWidth")]
    pub width: i32,
    #[serde(rename = "CarDriveTrain")]
    pub drive_train: String,
    #[serde(rename = "CarBaggageLT")]
    pub baggage_lt: i32,
    #[serde(rename = "CarBrakeMetre")]
    pub brake_metre: Option<i32>,
    #[serde(rename = "CarPrice")]
    pub price: Option<i64>,
    #[serde(rename = "CarPhotos")]
    pub photos: String,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: i32,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CarCreate {
    #[serde(rename = "ArabaMarka")]
    pub make: String,
    #[serde(rename = "CarModel")]
    pub model: String,
    #[serde(rename = "CarPack")]
    pub pack: String,
    #[serde(rename = "CarYear")]
    pub year: i32,
    #[serde(rename = "CarFuelType")]
    pub fuel_type: String,
    #[serde(rename = "CarEngineCapacity")]
    pub engine_capacity: i32,
    #[serde(rename = "CarHorsePower")]
    pub horse_power: i32,
    #[serde(rename = "CarType")]
    pub body_type: String,
    #[serde(rename = "CarTopSpeed")]
    pub top_speed: i32,
    #[serde(rename = "CarAcceleration")]
    pub acceleration: f64,
    #[serde(rename = "CarTransmission")]
    pub transmission: String,
    #[serde(rename = "CarEconomy")]
    pub economy: f64,
    #[serde(rename = "CarWeight")]
    pub weight: i32,
    #[serde(rename = "CarHeight")]
    pub height: i32,
    #[serde(rename = "CarWidth")]
    pub width: i32,
    #[serde(rename = "CarDriveTrain")]
    pub drive_train: String,
    #[serde(rename = "CarBaggageLT")]
    pub baggage_lt: i32,
    #[serde(rename = "CarBrakeMetre")]
    pub brake_metre: Option<i32>,
    #[serde(rename = "CarPrice")]
    pub price: Option<i64>,
    #[serde(rename = "CarPhotos")]
    pub photos: String,
}

impl CarCreate {
    pub fn into_car(self) -> Car {
        Car {
            car_id: Uuid::new_v4().to_string(),
            make: self.make,
            model: self.model,
            pack: self.pack,
            year: self.year,
            fuel_type: self.fuel_type,
            engine_capacity: self.engine_capacity,
            horse_power: self.horse_power,
            body_type: self.body_type,
            top_speed: self.top_speed,
            acceleration: self.acceleration,
            transmission: self.transmission,
            economy: self.economy,
            weight: self.weight,
            height: self.height,
            width: self.width,
            drive_train: self.drive_train,
            baggage_lt: self.baggage_lt,
            brake_metre: self.brake_metre,
            price: self.price,
            photos: self.photos,
            average_rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
        }
    }
}

/// Partial update; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarUpdate {
    #[serde(rename = "ArabaMarka")]
    pub make: Option<String>,
    #[serde(rename = "CarModel")]
    pub model: Option<String>,
    #[serde(rename = "CarPack")]
    pub pack: Option<String>,
    #[serde(rename = "CarYear")]
    pub year: Option<i32>,
    #[serde(rename = "CarFuelType")]
    pub fuel_type: Option<String>,
    #[serde(rename = "CarEngineCapacity")]
    pub engine_capacity: Option<i32>,
    #[serde(rename = "CarHorsePower")]
    pub horse_power: Option<i32>,
    #[serde(rename = "CarType")]
    pub body_type: Option<String>,
    #[serde(rename = "CarTopSpeed")]
    pub top_speed: Option<i32>,
    #[serde(rename = "CarAcceleration")]
    pub acceleration: Option<f64>,
    #[serde(rename = "CarTransmission")]
    pub transmission: Option<String>,
    #[serde(rename = "CarEconomy")]
    pub economy: Option<f64>,
    #[serde(rename = "CarWeight")]
    pub weight: Option<i32>,
    #[serde(rename = "CarHeight")]
    pub height: Option<i32>,
    #[serde(rename = "CarWidth")]
    pub width: Option<i32>,
    #[serde(rename = "CarDriveTrain")]
    pub drive_train: Option<String>,
    #[serde(rename = "CarBaggageLT")]
    pub baggage_lt: Option<i32>,
    #[serde(rename = "CarBrakeMetre")]
    pub brake_metre: Option<i32>,
    #[serde(rename = "CarPrice")]
    pub price: Option<i64>,
    #[serde(rename = "CarPhotos")]
    pub photos: Option<String>,
}

impl CarUpdate {
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.model.is_none()
            && self.pack.is_none()
            && self.year.is_none()
            && self.fuel_type.is_none()
            && self.engine_capacity.is_none()
            && self.horse_power.is_none()
            && self.body_type.is_none()
            && self.top_speed.is_none()
            && self.acceleration.is_none()
            && self.transmission.is_none()
            && self.economy.is_none()
            && self.weight.is_none()
            && self.height.is_none()
            && self.width.is_none()
            && self.drive_train.is_none()
            && self.baggage_lt.is_none()
            && self.brake_metre.is_none()
            && self.price.is_none()
            && self.photos.is_none()
    }

    /// Merge the provided fields onto an existing car. `brake_metre` and
    /// `price` can only be set, not cleared, matching the original API.
    pub fn apply_to(&self, car: &mut Car) {
        if let Some(v) = &self.make {
            car.make = v.clone();
        }
        if let Some(v) = &self.model {
            car.model = v.clone();
        }
        if let Some(v) = &self.pack {
            car.pack = v.clone();
        }
        if let Some(v) = self.year {
            car.year = v;
        }
        if let Some(v) = &self.fuel_type {
            car.fuel_type = v.clone();
        }
        if let Some(v) = self.engine_capacity {
            car.engine_capacity = v;
        }
        if let Some(v) = self.horse_power {
            car.horse_power = v;
        }
        if let Some(v) = &self.body_type {
            car.body_type = v.clone();
        }
        if let Some(v) = self.top_speed {
            car.top_speed = v;
        }
        if let Some(v) = self.acceleration {
            car.acceleration = v;
        }
        if let Some(v) = &self.transmission {
            car.transmission = v.clone();
        }
        if let Some(v) = self.economy {
            car.economy = v;
        }
        if let Some(v) = self.weight {
            car.weight = v;
        }
        if let Some(v) = self.height {
            car.height = v;
        }
        if let Some(v) = self.width {
            car.width = v;
        }
        if let Some(v) = &self.drive_train {
            car.drive_train = v.clone();
        }
        if let Some(v) = self.baggage_lt {
            car.baggage_lt = v;
        }
        if let Some(v) = self.brake_metre {
            car.brake_metre = Some(v);
        }
        if let Some(v) = self.price {
            car.price = Some(v);
        }
        if let Some(v) = &self.photos {
            car.photos = v.clone();
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonRequest {
    #[serde(rename = "car1Id")]
    pub car1_id: String,
    #[serde(rename = "car2Id")]
    pub car2_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_car() -> Car {
        CarCreate {
            make: "Renault".to_string(),
            model: "Clio".to_string(),
            pack: "Touch".to_string(),
            year: 2023,
            fuel_type: "Benzin".to_string(),
            engine_capacity: 999,
            horse_power: 90,
            body_type: "Hatchback".to_string(),
            top_speed: 180,
            acceleration: 12.2,
            transmission: "Manuel".to_string(),
            economy: 5.4,
            weight: 1178,
            height: 1440,
            width: 1798,
            drive_train: "FWD".to_string(),
            baggage_lt: 391,
            brake_metre: Some(38),
            price: Some(1_100_000),
            photos: "https://example.com/clio.jpg".to_string(),
        }
        .into_car()
    }

    #[test]
    fn new_car_starts_with_zeroed_rating_fields() {
        let car = sample_car();
        assert_eq!(car.average_rating, 0.0);
        assert_eq!(car.review_count, 0);
        assert!(!car.car_id.is_empty());
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(CarUpdate::default().is_empty());
        let update = CarUpdate {
            year: Some(2024),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn apply_to_only_touches_provided_fields() {
        let mut car = sample_car();
        let update = CarUpdate {
            horse_power: Some(130),
            price: Some(1_250_000),
            ..Default::default()
        };
        update.apply_to(&mut car);
        assert_eq!(car.horse_power, 130);
        assert_eq!(car.price, Some(1_250_000));
        assert_eq!(car.make, "Renault");
        assert_eq!(car.year, 2023);
    }
}
