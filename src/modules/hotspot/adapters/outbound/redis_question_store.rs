// Redis Stack question store.
//
// Documents live as RedisJSON values under "{group}:{question}". Every group
// owns one RediSearch index over its key prefix with a FLAT cosine vector
// field plus category/question/question_id fields.
//
// The connection manager is created on first use so the service can start
// while Redis is unreachable; once connected it reconnects on its own.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, Cmd, FromRedisValue, RedisError, Value};
use tokio::sync::OnceCell;

use crate::modules::hotspot::adapters::outbound::redis_reply::{
    SearchHit, parse_aggregate_reply, parse_search_reply,
};
use crate::modules::hotspot::core::ports::{QuestionStore, StoreError};
use crate::modules::hotspot::core::question::{
    GroupStats, IndexStatus, QuestionDocument, QuestionSummary, ScoredQuestion, document_key,
    group_prefix,
};

const DELETE_PAGE_SIZE: usize = 500;
const MAX_AGGREGATE_ROWS: usize = 10_000;

pub struct RedisQuestionStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
    dimension: usize,
}

impl RedisQuestionStore {
    pub fn new(url: &str, dimension: usize) -> Result<Self, StoreError> {
        let client = Client::open(url).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            connection: OnceCell::new(),
            dimension,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        let manager = self
            .connection
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(manager.clone())
    }

    async fn run<T: FromRedisValue>(&self, cmd: &Cmd, group_id: &str) -> Result<T, StoreError> {
        let mut connection = self.connection().await?;
        cmd.query_async(&mut connection)
            .await
            .map_err(|e| map_error(e, group_id))
    }

    async fn create_index(&self, group_id: &str) -> Result<bool, StoreError> {
        let mut connection = self.connection().await?;
        match create_index_cmd(group_id, self.dimension)
            .query_async::<Value>(&mut connection)
            .await
        {
            Ok(_) => {
                tracing::info!(group_id, dimension = self.dimension, "created question index");
                Ok(true)
            }
            Err(e) if e.to_string().to_lowercase().contains("index already exists") => Ok(false),
            Err(e) => Err(map_error(e, group_id)),
        }
    }
}

fn map_error(error: RedisError, group_id: &str) -> StoreError {
    let text = error.to_string();
    let lowered = text.to_lowercase();
    if lowered.contains("unknown index") || lowered.contains("no such index") {
        StoreError::IndexMissing(group_id.to_string())
    } else {
        StoreError::Backend(text)
    }
}

pub fn vector_to_bytes(vector: &[f32]) -> Vec<u8> {
    vector.iter().flat_map(|value| value.to_le_bytes()).collect()
}

/// Escapes a TAG value for use inside `@field:{...}`.
pub fn escape_tag_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if !(c.is_alphanumeric() || c == '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn create_index_cmd(group_id: &str, dimension: usize) -> Cmd {
    let mut cmd = redis::cmd("FT.CREATE");
    cmd.arg(group_id)
        .arg("ON")
        .arg("JSON")
        .arg("PREFIX")
        .arg(1)
        .arg(group_prefix(group_id))
        .arg("SCHEMA")
        .arg("$.query_vector")
        .arg("AS")
        .arg("vector")
        .arg("VECTOR")
        .arg("FLAT")
        .arg(6)
        .arg("TYPE")
        .arg("FLOAT32")
        .arg("DIM")
        .arg(dimension)
        .arg("DISTANCE_METRIC")
        .arg("COSINE")
        .arg("$.category")
        .arg("AS")
        .arg("category")
        .arg("TAG")
        .arg("CASESENSITIVE")
        .arg("$.question")
        .arg("AS")
        .arg("question")
        .arg("TEXT")
        .arg("$.question_id")
        .arg("AS")
        .arg("question_id")
        .arg("TEXT");
    cmd
}

pub fn knn_search_cmd(group_id: &str, vector: &[f32], limit: usize) -> Cmd {
    let mut cmd = redis::cmd("FT.SEARCH");
    cmd.arg(group_id)
        .arg(format!("*=>[KNN {limit} @vector $vec AS vector_score]"))
        .arg("RETURN")
        .arg(7)
        .arg("question")
        .arg("question_id")
        .arg("category")
        .arg("$.standard_reply")
        .arg("AS")
        .arg("standard_reply")
        .arg("vector_score")
        .arg("SORTBY")
        .arg("vector_score")
        .arg("ASC")
        .arg("LIMIT")
        .arg(0)
        .arg(limit)
        .arg("PARAMS")
        .arg(2)
        .arg("vec")
        .arg(vector_to_bytes(vector))
        .arg("DIALECT")
        .arg(2);
    cmd
}

pub fn list_cmd(group_id: &str, limit: usize) -> Cmd {
    let mut cmd = redis::cmd("FT.SEARCH");
    cmd.arg(group_id)
        .arg("*")
        .arg("RETURN")
        .arg(6)
        .arg("question")
        .arg("question_id")
        .arg("category")
        .arg("$.standard_reply")
        .arg("AS")
        .arg("standard_reply")
        .arg("LIMIT")
        .arg(0)
        .arg(limit);
    cmd
}

pub fn category_keys_cmd(group_id: &str, category: &str, page: usize) -> Cmd {
    let mut cmd = redis::cmd("FT.SEARCH");
    cmd.arg(group_id)
        .arg(format!("@category:{{{}}}", escape_tag_value(category)))
        .arg("NOCONTENT")
        .arg("LIMIT")
        .arg(0)
        .arg(page)
        .arg("DIALECT")
        .arg(2);
    cmd
}

pub fn category_counts_cmd(group_id: &str) -> Cmd {
    let mut cmd = redis::cmd("FT.AGGREGATE");
    cmd.arg(group_id)
        .arg("*")
        .arg("GROUPBY")
        .arg(1)
        .arg("@category")
        .arg("REDUCE")
        .arg("COUNT")
        .arg(0)
        .arg("AS")
        .arg("count")
        .arg("LIMIT")
        .arg(0)
        .arg(MAX_AGGREGATE_ROWS);
    cmd
}

fn summary_from_hit(hit: &SearchHit) -> QuestionSummary {
    QuestionSummary {
        key: hit.key.clone(),
        question_id: hit.field("question_id"),
        question: hit.field("question"),
        standard_reply: hit.field("standard_reply"),
        category: hit.field("category"),
    }
}

fn scored_from_hit(hit: &SearchHit) -> Result<ScoredQuestion, StoreError> {
    let raw = hit.field("vector_score");
    let distance: f32 = raw.parse().map_err(|_| StoreError::Malformed {
        key: hit.key.clone(),
        reason: format!("vector_score {raw:?} is not a number"),
    })?;
    let summary = summary_from_hit(hit);
    Ok(ScoredQuestion {
        key: summary.key,
        question_id: summary.question_id,
        question: summary.question,
        standard_reply: summary.standard_reply,
        category: summary.category,
        similarity_score: 1.0 - distance,
    })
}

#[async_trait]
impl QuestionStore for RedisQuestionStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let _: String = self.run(&redis::cmd("PING"), "").await?;
        Ok(())
    }

    async fn ensure_index(&self, group_id: &str) -> Result<bool, StoreError> {
        let mut info = redis::cmd("FT.INFO");
        info.arg(group_id);
        match self.run::<Value>(&info, group_id).await {
            Ok(_) => Ok(false),
            Err(StoreError::IndexMissing(_)) => self.create_index(group_id).await,
            Err(e) => Err(e),
        }
    }

    async fn rebuild_index(&self, group_id: &str) -> Result<(), StoreError> {
        let mut drop_index = redis::cmd("FT.DROPINDEX");
        drop_index.arg(group_id);
        match self.run::<Value>(&drop_index, group_id).await {
            Ok(_) => tracing::info!(group_id, "dropped question index"),
            Err(StoreError::IndexMissing(_)) => {
                tracing::warn!(group_id, "no question index to drop")
            }
            Err(e) => return Err(e),
        }
        self.create_index(group_id).await.map(|_| ())
    }

    async fn get(
        &self,
        group_id: &str,
        question_id: &str,
    ) -> Result<Option<QuestionDocument>, StoreError> {
        let key = document_key(group_id, question_id);
        let mut cmd = redis::cmd("JSON.GET");
        cmd.arg(&key);
        let raw: Option<String> = self.run(&cmd, group_id).await?;
        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| StoreError::Malformed {
                key: key.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
    }

    async fn put(&self, group_id: &str, document: &QuestionDocument) -> Result<(), StoreError> {
        let key = document_key(group_id, &document.question_id);
        let json = serde_json::to_string(document).map_err(|e| StoreError::Malformed {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        let mut cmd = redis::cmd("JSON.SET");
        cmd.arg(&key).arg("$").arg(json);
        let _: Value = self.run(&cmd, group_id).await?;
        Ok(())
    }

    async fn delete(&self, group_id: &str, question_id: &str) -> Result<bool, StoreError> {
        let mut cmd = redis::cmd("DEL");
        cmd.arg(document_key(group_id, question_id));
        let removed: u64 = self.run(&cmd, group_id).await?;
        Ok(removed > 0)
    }

    async fn delete_by_category(&self, group_id: &str, category: &str) -> Result<u64, StoreError> {
        let search = category_keys_cmd(group_id, category, DELETE_PAGE_SIZE);
        let mut deleted = 0;
        loop {
            let reply: Value = self.run(&search, group_id).await?;
            let keys: Vec<String> = parse_search_reply(&reply)?
                .hits
                .into_iter()
                .map(|hit| hit.key)
                .collect();
            if keys.is_empty() {
                break;
            }
            let mut del = redis::cmd("DEL");
            del.arg(&keys);
            let removed: u64 = self.run(&del, group_id).await?;
            deleted += removed;
            if removed == 0 {
                break;
            }
        }
        Ok(deleted)
    }

    async fn list(
        &self,
        group_id: &str,
        limit: usize,
    ) -> Result<Vec<QuestionSummary>, StoreError> {
        let reply: Value = self.run(&list_cmd(group_id, limit), group_id).await?;
        Ok(parse_search_reply(&reply)?
            .hits
            .iter()
            .map(summary_from_hit)
            .collect())
    }

    async fn search(
        &self,
        group_id: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredQuestion>, StoreError> {
        let reply: Value = self
            .run(&knn_search_cmd(group_id, vector, limit), group_id)
            .await?;
        parse_search_reply(&reply)?
            .hits
            .iter()
            .map(scored_from_hit)
            .collect()
    }

    async fn stats(&self, group_id: &str) -> Result<GroupStats, StoreError> {
        let mut info = redis::cmd("FT.INFO");
        info.arg(group_id);
        match self.run::<Value>(&info, group_id).await {
            Ok(_) => {}
            Err(StoreError::IndexMissing(_)) => return Ok(GroupStats::missing(group_id)),
            Err(e) => return Err(e),
        }

        let mut count = redis::cmd("FT.SEARCH");
        count.arg(group_id).arg("*").arg("LIMIT").arg(0).arg(0);
        let reply: Value = self.run(&count, group_id).await?;
        let total_questions = parse_search_reply(&reply)?.total;

        let reply: Value = self.run(&category_counts_cmd(group_id), group_id).await?;
        let categories = parse_aggregate_reply(&reply)?
            .into_iter()
            .filter_map(|row| {
                let count: u64 = row.get("count")?.parse().ok()?;
                Some((row.get("category")?.clone(), count))
            })
            .collect();

        Ok(GroupStats {
            group_id: group_id.to_string(),
            total_questions,
            categories,
            index_status: IndexStatus::Active,
        })
    }
}
