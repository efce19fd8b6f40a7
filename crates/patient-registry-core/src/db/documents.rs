//! Document operations.

use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, OptionalExtension};
use serde_json::{Map, Value};

use super::{Database, DbError, DbResult, DocumentStore};

/// A stored document: its identifier and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Equality filter on a dot-separated field path (e.g. `address.city`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// Collection query: equality filters combined with AND, optional ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep documents whose `field` equals `value`.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Order ascending by `field`.
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }
}

impl DocumentStore for Database {
    fn add_document(&self, collection: &str, data: &Value) -> DbResult<String> {
        if !data.is_object() {
            return Err(DbError::Constraint(
                "document body must be a JSON object".into(),
            ));
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        let body = serde_json::to_string(data)?;

        self.conn.execute(
            "INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)",
            params![collection, id, body],
        )?;
        log::debug!("added document {}/{}", collection, id);
        Ok(id)
    }

    fn get_document(&self, collection: &str, id: &str) -> DbResult<Option<Document>> {
        self.conn
            .query_row(
                "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?
            .map(|(id, body)| to_document(id, &body))
            .transpose()
    }

    fn list_documents(&self, collection: &str) -> DbResult<Vec<Document>> {
        self.query_documents(collection, &Query::new())
    }

    fn query_documents(&self, collection: &str, query: &Query) -> DbResult<Vec<Document>> {
        let mut sql = String::from("SELECT id, body FROM documents WHERE collection = ?1");
        let mut bindings: Vec<SqlValue> = vec![SqlValue::Text(collection.to_string())];

        for filter in &query.filters {
            bindings.push(SqlValue::Text(json_path(&filter.field)?));
            bindings.push(to_sql_value(&filter.value)?);
            let n = bindings.len();
            sql.push_str(&format!(" AND json_extract(body, ?{}) = ?{}", n - 1, n));
        }

        match &query.order_by {
            Some(field) => {
                bindings.push(SqlValue::Text(json_path(field)?));
                sql.push_str(&format!(
                    " ORDER BY json_extract(body, ?{}), rowid",
                    bindings.len()
                ));
            }
            None => sql.push_str(" ORDER BY rowid"),
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bindings.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, body) = row?;
            documents.push(to_document(id, &body)?);
        }
        log::debug!(
            "query on {} returned {} documents",
            collection,
            documents.len()
        );
        Ok(documents)
    }

    fn update_document(&self, collection: &str, id: &str, fields: &Map<String, Value>) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        let body: Option<String> = tx
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;
        let body = body.ok_or_else(|| DbError::NotFound(format!("{}/{}", collection, id)))?;

        let mut data: Value = serde_json::from_str(&body)?;
        let object = data.as_object_mut().ok_or_else(|| {
            DbError::Constraint(format!("{}/{} is not a JSON object", collection, id))
        })?;
        for (key, value) in fields {
            object.insert(key.clone(), value.clone());
        }

        tx.execute(
            "UPDATE documents SET body = ?3 WHERE collection = ?1 AND id = ?2",
            params![collection, id, serde_json::to_string(&data)?],
        )?;
        tx.commit()?;
        log::debug!("updated {} fields of {}/{}", fields.len(), collection, id);
        Ok(())
    }

    fn delete_document(&self, collection: &str, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;
        Ok(rows_affected > 0)
    }
}

fn to_document(id: String, body: &str) -> DbResult<Document> {
    Ok(Document {
        id,
        data: serde_json::from_str(body)?,
    })
}

/// Convert `address.city` to the SQLite JSON path `$."address"."city"`.
fn json_path(field: &str) -> DbResult<String> {
    let mut path = String::from("$");
    for segment in field.split('.') {
        if segment.is_empty() || segment.contains('"') {
            return Err(DbError::Constraint(format!("invalid field path: {}", field)));
        }
        path.push_str(&format!(".\"{}\"", segment));
    }
    Ok(path)
}

fn to_sql_value(value: &Value) -> DbResult<SqlValue> {
    match value {
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(SqlValue::Integer(i)),
            None => n
                .as_f64()
                .map(SqlValue::Real)
                .ok_or_else(|| DbError::Constraint(format!("unsupported number: {}", n))),
        },
        other => Err(DbError::Constraint(format!(
            "unsupported filter value: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let db = setup_db();

        let id = db
            .add_document("patients", &json!({"name": "Ana", "address": {"city": "Sao Luis"}}))
            .unwrap();

        let doc = db.get_document("patients", &id).unwrap().unwrap();
        assert_eq!(doc.id, id);
        assert_eq!(doc.data["address"]["city"], "Sao Luis");
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = setup_db();
        assert!(db.get_document("patients", "nope").unwrap().is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let db = setup_db();
        let a = db.add_document("patients", &json!({})).unwrap();
        let b = db.add_document("patients", &json!({})).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_non_object_body() {
        let db = setup_db();
        let result = db.add_document("patients", &json!(["not", "an", "object"]));
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_collections_are_isolated() {
        let db = setup_db();
        let id = db.add_document("patients", &json!({"name": "Ana"})).unwrap();
        db.add_document("other", &json!({"name": "Bruno"})).unwrap();

        let docs = db.list_documents("patients").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, id);
        assert!(db.get_document("other", &id).unwrap().is_none());
    }

    #[test]
    fn test_list_in_insertion_order() {
        let db = setup_db();
        db.add_document("patients", &json!({"name": "Carla"})).unwrap();
        db.add_document("patients", &json!({"name": "Ana"})).unwrap();

        let names: Vec<_> = db
            .list_documents("patients")
            .unwrap()
            .into_iter()
            .map(|d| d.data["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Carla", "Ana"]);
    }

    #[test]
    fn test_query_nested_equality_with_order() {
        let db = setup_db();
        db.add_document("patients", &json!({"name": "Carla", "address": {"city": "Imperatriz"}}))
            .unwrap();
        db.add_document("patients", &json!({"name": "Bruno", "address": {"city": "Sao Luis"}}))
            .unwrap();
        db.add_document("patients", &json!({"name": "Ana", "address": {"city": "Sao Luis"}}))
            .unwrap();
        db.add_document("patients", &json!({"name": "Davi"})).unwrap();

        let query = Query::new()
            .where_eq("address.city", "Sao Luis")
            .order_by("name");
        let names: Vec<_> = db
            .query_documents("patients", &query)
            .unwrap()
            .into_iter()
            .map(|d| d.data["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Ana", "Bruno"]);
    }

    #[test]
    fn test_query_numeric_filter() {
        let db = setup_db();
        db.add_document("patients", &json!({"weightKg": 70})).unwrap();
        db.add_document("patients", &json!({"weightKg": 82.5})).unwrap();

        let query = Query::new().where_eq("weightKg", 82.5);
        assert_eq!(db.query_documents("patients", &query).unwrap().len(), 1);
    }

    #[test]
    fn test_query_rejects_bad_field_path() {
        let db = setup_db();
        let query = Query::new().where_eq("address..city", "x");
        assert!(matches!(
            db.query_documents("patients", &query),
            Err(DbError::Constraint(_))
        ));
    }

    #[test]
    fn test_update_replaces_top_level_fields() {
        let db = setup_db();
        let id = db
            .add_document(
                "patients",
                &json!({"name": "Ana", "phones": ["1", "2"], "createdAt": "t0"}),
            )
            .unwrap();

        let mut fields = Map::new();
        fields.insert("phones".into(), json!(["3"]));
        fields.insert("updatedAt".into(), json!("t1"));
        db.update_document("patients", &id, &fields).unwrap();

        let doc = db.get_document("patients", &id).unwrap().unwrap();
        assert_eq!(doc.data["name"], "Ana");
        assert_eq!(doc.data["phones"], json!(["3"]));
        assert_eq!(doc.data["createdAt"], "t0");
        assert_eq!(doc.data["updatedAt"], "t1");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let db = setup_db();
        let result = db.update_document("patients", "nope", &Map::new());
        assert!(matches!(result, Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_delete() {
        let db = setup_db();
        let id = db.add_document("patients", &json!({"name": "Ana"})).unwrap();

        assert!(db.delete_document("patients", &id).unwrap());
        assert!(!db.delete_document("patients", &id).unwrap());
        assert!(db.get_document("patients", &id).unwrap().is_none());
    }

    #[test]
    fn test_json_path() {
        assert_eq!(json_path("name").unwrap(), "$.\"name\"");
        assert_eq!(json_path("address.city").unwrap(), "$.\"address\".\"city\"");
        assert!(json_path("").is_err());
    }
}
