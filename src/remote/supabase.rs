//! Supabase Remote Store
//!
//! `RemoteStore` over the PostgREST HTTP API. In the browser reqwest runs
//! on top of `fetch`.

use async_trait::async_trait;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::RemoteStore;
use crate::config::AppConfig;
use crate::error::{RemoteFailure, RemoteResult};
use crate::models::{NewSong, OrderUpdate, Song, SongId};

/// Characters left as-is in table and procedure names
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-').remove(b'.');

/// Ordering for the full list; `created_at` breaks ties between duplicate orders
const LIST_ORDER: &str = "order.asc,created_at.asc";

// ========================
// Wire Structs
// ========================

#[derive(Serialize)]
struct ReorderArgs<'a> {
    updates: &'a [OrderUpdate],
}

/// Error body returned by PostgREST
#[derive(Deserialize)]
struct PostgrestError {
    #[serde(default)]
    message: String,
}

// ========================
// Store
// ========================

pub struct SupabaseStore {
    http: Client,
    base_url: String,
    anon_key: String,
    table: String,
    reorder_rpc: String,
}

impl SupabaseStore {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.supabase_url.clone(),
            anon_key: config.anon_key.clone(),
            table: config.table.clone(),
            reorder_rpc: config.reorder_rpc.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, utf8_percent_encode(&self.table, PATH_SEGMENT))
    }

    fn rpc_url(&self) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, utf8_percent_encode(&self.reorder_rpc, PATH_SEGMENT))
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn patch(&self, id: SongId, body: serde_json::Value) -> RemoteResult<()> {
        let response = self
            .request(Method::PATCH, self.table_url())
            .query(&[("id", id_filter(id))])
            .json(&body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

fn id_filter(id: SongId) -> String {
    format!("eq.{}", id)
}

/// Turn a non-2xx response into a `RemoteFailure`
async fn check(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteFailure::new(failure_message(status.as_u16(), &body)))
}

fn failure_message(status: u16, body: &str) -> String {
    serde_json::from_str::<PostgrestError>(body)
        .ok()
        .map(|err| err.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status))
}

#[async_trait(?Send)]
impl RemoteStore for SupabaseStore {
    async fn create(&self, song: &NewSong) -> RemoteResult<Song> {
        debug!("[REMOTE] insert '{}' at order {}", song.title, song.order);
        let response = self
            .request(Method::POST, self.table_url())
            .header("Prefer", "return=representation")
            .json(&[song])
            .send()
            .await?;
        let rows: Vec<Song> = check(response).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RemoteFailure::new("insert returned no rows"))
    }

    async fn list_ordered(&self) -> RemoteResult<Vec<Song>> {
        debug!("[REMOTE] select all");
        let response = self
            .request(Method::GET, self.table_url())
            .query(&[("select", "*"), ("order", LIST_ORDER)])
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, id: SongId) -> RemoteResult<()> {
        debug!("[REMOTE] delete {}", id);
        let response = self
            .request(Method::DELETE, self.table_url())
            .query(&[("id", id_filter(id))])
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn update_title(&self, id: SongId, title: &str) -> RemoteResult<()> {
        debug!("[REMOTE] rename {}", id);
        self.patch(id, json!({ "title": title })).await
    }

    async fn update_checked(&self, id: SongId, checked: bool) -> RemoteResult<()> {
        debug!("[REMOTE] check {} = {}", id, checked);
        self.patch(id, json!({ "is_checked": checked })).await
    }

    async fn batch_update_order(&self, updates: &[OrderUpdate]) -> RemoteResult<()> {
        debug!("[REMOTE] reorder {} songs", updates.len());
        let response = self
            .request(Method::POST, self.rpc_url())
            .json(&ReorderArgs { updates })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(table: &str) -> AppConfig {
        AppConfig::from_json(&format!(
            r#"{{"supabase_url": "https://abc.supabase.co/", "anon_key": "k", "table": "{}"}}"#,
            table
        ))
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let store = SupabaseStore::new(&config("songs"));
        assert_eq!(store.table_url(), "https://abc.supabase.co/rest/v1/songs");
        assert_eq!(store.rpc_url(), "https://abc.supabase.co/rest/v1/rpc/update_song_order");
    }

    #[test]
    fn test_table_name_is_encoded() {
        let store = SupabaseStore::new(&config("my songs"));
        assert_eq!(store.table_url(), "https://abc.supabase.co/rest/v1/my%20songs");
    }

    #[test]
    fn test_failure_message_prefers_postgrest_message() {
        let body = r#"{"code":"23505","message":"duplicate key value","details":null}"#;
        assert_eq!(failure_message(409, body), "duplicate key value");
    }

    #[test]
    fn test_failure_message_falls_back_to_status() {
        assert_eq!(failure_message(502, "<html>bad gateway</html>"), "HTTP 502");
        assert_eq!(failure_message(404, r#"{"message":""}"#), "HTTP 404");
    }

    #[test]
    fn test_reorder_body() {
        let updates = [OrderUpdate { id: 2, order: 0 }, OrderUpdate { id: 1, order: 1 }];
        let body = serde_json::to_value(ReorderArgs { updates: &updates }).unwrap();
        assert_eq!(
            body,
            json!({"updates": [{"id": 2, "order": 0}, {"id": 1, "order": 1}]})
        );
    }
}
