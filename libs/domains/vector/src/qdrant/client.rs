use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    self, CreateCollectionBuilder, Distance, PointId, PointStruct, SearchPointsBuilder,
    UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder,
};
use uuid::Uuid;

use super::QdrantConfig;
use crate::error::{VectorError, VectorResult};
use crate::models::{
    CollectionInfo, DistanceMetric, SearchQuery, SearchResult, Vector, VectorConfig,
};
use crate::repository::VectorRepository;

/// Qdrant-backed implementation of VectorRepository
pub struct QdrantRepository {
    client: Qdrant,
}

impl QdrantRepository {
    pub async fn new(config: QdrantConfig) -> VectorResult<Self> {
        let mut builder = Qdrant::from_url(&config.url);

        if let Some(api_key) = config.api_key {
            builder = builder.api_key(api_key);
        }

        builder = builder.timeout(Duration::from_secs(config.timeout_secs));

        let client = builder
            .build()
            .map_err(|e| VectorError::Qdrant(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn to_qdrant_distance(metric: DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    /// Qdrant reports cosine results as similarity scores (1 = identical).
    /// The rest of the system speaks cosine distance (0 = identical), so
    /// convert at this boundary.
    fn score_to_distance(score: f32) -> f32 {
        1.0 - score
    }

    fn uuid_to_point_id(id: Uuid) -> PointId {
        PointId::from(id.to_string())
    }

    fn point_id_to_uuid(point_id: &PointId) -> VectorResult<Uuid> {
        match &point_id.point_id_options {
            Some(qdrant::point_id::PointIdOptions::Uuid(uuid_str)) => Uuid::parse_str(uuid_str)
                .map_err(|e| VectorError::Internal(format!("Invalid UUID: {}", e))),
            Some(qdrant::point_id::PointIdOptions::Num(num)) => Ok(Uuid::from_u128(*num as u128)),
            None => Err(VectorError::Internal("Missing point ID".to_string())),
        }
    }

    fn payload_to_qdrant(payload: Option<serde_json::Value>) -> HashMap<String, QdrantValue> {
        let Some(value) = payload else {
            return HashMap::new();
        };

        let mut result = HashMap::new();

        if let serde_json::Value::Object(map) = value {
            for (key, val) in map {
                if let Some(qdrant_val) = json_to_qdrant_value(val) {
                    result.insert(key, qdrant_val);
                }
            }
        }

        result
    }

    fn qdrant_to_payload(payload: HashMap<String, QdrantValue>) -> Option<serde_json::Value> {
        if payload.is_empty() {
            return None;
        }

        let mut map = serde_json::Map::new();
        for (key, val) in payload {
            if let Some(json_val) = qdrant_value_to_json(val) {
                map.insert(key, json_val);
            }
        }

        Some(serde_json::Value::Object(map))
    }
}

fn json_to_qdrant_value(val: serde_json::Value) -> Option<QdrantValue> {
    match val {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(QdrantValue::from(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(QdrantValue::from(i))
            } else {
                n.as_f64().map(QdrantValue::from)
            }
        }
        serde_json::Value::String(s) => Some(QdrantValue::from(s)),
        serde_json::Value::Array(items) => {
            let values: Vec<QdrantValue> =
                items.into_iter().filter_map(json_to_qdrant_value).collect();
            Some(QdrantValue {
                kind: Some(qdrant::value::Kind::ListValue(qdrant::ListValue { values })),
            })
        }
        serde_json::Value::Object(_) => {
            // Nested objects are stored as their JSON text
            Some(QdrantValue::from(val.to_string()))
        }
    }
}

fn qdrant_value_to_json(val: QdrantValue) -> Option<serde_json::Value> {
    use qdrant::value::Kind;

    match val.kind {
        Some(Kind::NullValue(_)) => Some(serde_json::Value::Null),
        Some(Kind::BoolValue(b)) => Some(serde_json::Value::Bool(b)),
        Some(Kind::IntegerValue(i)) => Some(serde_json::Value::Number(i.into())),
        Some(Kind::DoubleValue(f)) => serde_json::Number::from_f64(f).map(serde_json::Value::Number),
        Some(Kind::StringValue(s)) => Some(serde_json::Value::String(s)),
        Some(Kind::ListValue(list)) => Some(serde_json::Value::Array(
            list.values
                .into_iter()
                .filter_map(qdrant_value_to_json)
                .collect(),
        )),
        _ => None,
    }
}

#[async_trait]
impl VectorRepository for QdrantRepository {
    async fn create_collection(
        &self,
        name: &str,
        config: VectorConfig,
    ) -> VectorResult<CollectionInfo> {
        let builder = CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
            config.dimension as u64,
            Self::to_qdrant_distance(config.distance),
        ));

        self.client.create_collection(builder).await?;

        Ok(CollectionInfo {
            name: name.to_string(),
            points_count: 0,
            config,
        })
    }

    async fn collection_exists(&self, name: &str) -> VectorResult<bool> {
        Ok(self.client.collection_exists(name).await?)
    }

    async fn delete_collection(&self, name: &str) -> VectorResult<bool> {
        self.client.delete_collection(name).await?;
        Ok(true)
    }

    async fn upsert_batch(
        &self,
        collection_name: &str,
        vectors: Vec<Vector>,
        wait: bool,
    ) -> VectorResult<Vec<Uuid>> {
        let ids: Vec<Uuid> = vectors.iter().map(|v| v.id).collect();

        let points: Vec<PointStruct> = vectors
            .into_iter()
            .map(|v| {
                PointStruct::new(
                    Self::uuid_to_point_id(v.id),
                    v.values,
                    Self::payload_to_qdrant(v.payload),
                )
            })
            .collect();

        let mut builder = UpsertPointsBuilder::new(collection_name, points);
        if wait {
            builder = builder.wait(true);
        }

        self.client.upsert_points(builder).await?;

        Ok(ids)
    }

    async fn search(
        &self,
        collection_name: &str,
        query: SearchQuery,
    ) -> VectorResult<Vec<SearchResult>> {
        let mut builder =
            SearchPointsBuilder::new(collection_name, query.vector, query.limit as u64);
        builder = builder.with_payload(query.with_payloads);

        let results = self.client.search_points(builder).await?;

        results
            .result
            .into_iter()
            .map(|point| {
                let id = point
                    .id
                    .as_ref()
                    .map(Self::point_id_to_uuid)
                    .transpose()?
                    .ok_or_else(|| VectorError::Internal("Missing point ID".to_string()))?;

                Ok(SearchResult {
                    id,
                    distance: Some(Self::score_to_distance(point.score)),
                    payload: Self::qdrant_to_payload(point.payload),
                })
            })
            .collect()
    }

    async fn ping(&self) -> VectorResult<()> {
        self.client.health_check().await?;
        Ok(())
    }
}
