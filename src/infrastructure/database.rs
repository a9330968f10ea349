//! MongoDB persistence gateway

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    error::ErrorKind,
    Client, Collection,
};
use serde::{de, Deserialize, Deserializer};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use super::store::{FoodStore, StoreError, StoreResult};
use crate::app::foods::model::{Food, FoodId, FoodPatch, NewFood};

pub const FOODS_COLLECTION: &str = "foods";

/// Stored shape of a food document. Missing or null fields read as their
/// defaults; numeric text fields read as their text and numeric-string
/// prices as numbers.
#[derive(Debug, Deserialize)]
struct FoodDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default, deserialize_with = "lenient_text")]
    name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    price: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    category: String,
    #[serde(default, deserialize_with = "lenient_text")]
    description: String,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::String(s) => Ok(s),
        Bson::Null | Bson::Undefined => Ok(String::new()),
        Bson::Int32(n) => Ok(n.to_string()),
        Bson::Int64(n) => Ok(n.to_string()),
        Bson::Double(n) => Ok(n.to_string()),
        Bson::Boolean(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!("expected text, found {}", other))),
    }
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::Double(n) => Ok(n),
        Bson::Int32(n) => Ok(f64::from(n)),
        Bson::Int64(n) => Ok(n as f64),
        Bson::Null | Bson::Undefined => Ok(0.0),
        Bson::String(s) if s.trim().is_empty() => Ok(0.0),
        Bson::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("price `{}` is not a number", s))),
        other => Err(de::Error::custom(format!("expected a price, found {}", other))),
    }
}

/// Decodes what can be decoded. Documents that cannot become a `Food`
/// (e.g. a non-ObjectId `_id`) are logged and skipped.
fn decode_foods(docs: Vec<Document>) -> Vec<Food> {
    docs.into_iter()
        .filter_map(|doc| {
            let id = doc.get("_id").cloned();
            match mongodb::bson::from_document::<FoodDocument>(doc) {
                Ok(food) => Some(food.into()),
                Err(err) => {
                    warn!(?id, "skipping undecodable food document: {}", err);
                    None
                }
            }
        })
        .collect()
}

impl From<FoodDocument> for Food {
    fn from(doc: FoodDocument) -> Self {
        Food {
            id: doc.id.into(),
            name: doc.name,
            price: doc.price,
            category: doc.category,
            description: doc.description,
        }
    }
}

/// Shared handle to the `foods` collection.
///
/// The driver client is established on first use and reused for the
/// lifetime of the handle.
pub struct MongoFoodStore {
    uri: String,
    database_name: String,
    client: OnceCell<Client>,
}

impl MongoFoodStore {
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> StoreResult<&Client> {
        self.client
            .get_or_try_init(|| async {
                let client = Client::with_uri_str(&self.uri).await.map_err(|e| {
                    match *e.kind {
                        ErrorKind::InvalidArgument { .. } => StoreError::NotConfigured(e.to_string()),
                        _ => StoreError::Mongo(e),
                    }
                })?;
                info!(database = %self.database_name, "connected to MongoDB");
                Ok(client)
            })
            .await
    }

    async fn collection<T: Send + Sync>(&self) -> StoreResult<Collection<T>> {
        let client = self.client().await?;
        Ok(client
            .database(&self.database_name)
            .collection::<T>(FOODS_COLLECTION))
    }
}

#[async_trait]
impl FoodStore for MongoFoodStore {
    async fn list(&self) -> StoreResult<Vec<Food>> {
        let coll = self.collection::<Document>().await?;
        let docs: Vec<Document> = coll.find(doc! {}).await?.try_collect().await?;
        let total = docs.len();
        let foods = decode_foods(docs);
        debug!(total, decoded = foods.len(), "listed foods");
        Ok(foods)
    }

    async fn insert(&self, food: &NewFood) -> StoreResult<FoodId> {
        let coll = self.collection::<Document>().await?;
        let result = coll
            .insert_one(doc! {
                "name": food.name.as_str(),
                "price": food.price,
                "category": food.category.as_str(),
                "description": food.description.as_str(),
            })
            .await?;

        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(oid.into()),
            other => Err(StoreError::UnexpectedId(other.to_string())),
        }
    }

    async fn update(&self, id: FoodId, patch: &FoodPatch) -> StoreResult<u64> {
        let coll = self.collection::<Document>().await?;
        let result = coll
            .update_one(doc! { "_id": id.object_id() }, doc! { "$set": set_document(patch) })
            .await?;
        debug!(%id, matched = result.matched_count, modified = result.modified_count, "updated food");
        Ok(result.matched_count)
    }

    async fn delete(&self, id: FoodId) -> StoreResult<u64> {
        let coll = self.collection::<Document>().await?;
        let result = coll.delete_one(doc! { "_id": id.object_id() }).await?;
        debug!(%id, deleted = result.deleted_count, "deleted food");
        Ok(result.deleted_count)
    }
}

fn set_document(patch: &FoodPatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name.as_str());
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    if let Some(category) = &patch.category {
        set.insert("category", category.as_str());
    }
    if let Some(description) = &patch.description {
        set.insert("description", description.as_str());
    }
    set
}
