use crate::modules::production::domain::Production;
use crate::schema::productions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

// For reading from database
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = productions)]
pub struct ProductionModel {
    pub id: Uuid,
    pub title: String,
    pub producer: String,
    pub start_date: DateTime<Utc>,
    pub avg_rating: f64,
    pub rating_count: i32,
    pub review_count: i32,
    pub rating_version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// For inserting; rating columns start from their defaults
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = productions)]
pub struct NewProduction {
    pub id: Uuid,
    pub title: String,
    pub producer: String,
    pub start_date: DateTime<Utc>,
}

impl From<ProductionModel> for Production {
    fn from(model: ProductionModel) -> Self {
        Production {
            id: model.id,
            title: model.title,
            producer: model.producer,
            start_date: model.start_date,
            avg_rating: model.avg_rating,
            rating_count: model.rating_count.max(0) as u32,
            review_count: model.review_count.max(0) as u32,
            rating_version: model.rating_version.max(0) as u64,
        }
    }
}

impl From<&Production> for NewProduction {
    fn from(production: &Production) -> Self {
        NewProduction {
            id: production.id,
            title: production.title.clone(),
            producer: production.producer.clone(),
            start_date: production.start_date,
        }
    }
}
