use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::{
    error::AppResult,
    models::{TodoItem, TodoList},
};

/// Collection holding items of the default list.
pub const ITEMS_COLLECTION: &str = "todoitems";
/// Collection holding named lists with their embedded items.
pub const LISTS_COLLECTION: &str = "lists";

/// Each method maps to a single database call.
#[async_trait]
pub trait TodoListRepository: Send + Sync {
    async fn init(&self) -> AppResult<()>;
    async fn default_items(&self) -> AppResult<Vec<TodoItem>>;
    async fn add_default_item(&self, item: TodoItem) -> AppResult<()>;
    async fn remove_default_item(&self, id: ObjectId) -> AppResult<bool>;
    async fn find_list(&self, name: &str) -> AppResult<Option<TodoList>>;
    async fn create_list(&self, name: &str) -> AppResult<TodoList>;
    /// Appends to the named list, creating the list when it is missing.
    async fn push_item(&self, list_name: &str, item: TodoItem) -> AppResult<()>;
    /// Removes the embedded item with `id`. Returns `false` when no list has
    /// that name.
    async fn pull_item(&self, list_name: &str, id: ObjectId) -> AppResult<bool>;

    async fn shutdown(&self) {}
}

#[derive(Clone)]
pub struct MongoTodoListRepository {
    client: Client,
    database: Database,
    items: Collection<TodoItem>,
    lists: Collection<TodoList>,
}

impl MongoTodoListRepository {
    pub async fn connect(uri: &str, database: &str) -> AppResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        let client = Client::with_options(options)?;
        Ok(Self::from_client(client, database))
    }

    pub fn from_client(client: Client, database: &str) -> Self {
        let database = client.database(database);
        Self {
            items: database.collection(ITEMS_COLLECTION),
            lists: database.collection(LISTS_COLLECTION),
            database,
            client,
        }
    }

    pub fn database(&self) -> &Database {
        &self.database
    }
}

#[async_trait]
impl TodoListRepository for MongoTodoListRepository {
    async fn init(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        info!(database = %self.database.name(), "connected to mongodb");
        Ok(())
    }

    async fn default_items(&self) -> AppResult<Vec<TodoItem>> {
        let cursor = self.items.find(doc! {}).await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }

    async fn add_default_item(&self, item: TodoItem) -> AppResult<()> {
        self.items.insert_one(&item).await?;
        Ok(())
    }

    async fn remove_default_item(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.items.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn find_list(&self, name: &str) -> AppResult<Option<TodoList>> {
        Ok(self.lists.find_one(doc! { "name": name }).await?)
    }

    async fn create_list(&self, name: &str) -> AppResult<TodoList> {
        let list = TodoList::empty(name);
        self.lists.insert_one(&list).await?;
        Ok(list)
    }

    async fn push_item(&self, list_name: &str, item: TodoItem) -> AppResult<()> {
        let result = self
            .lists
            .update_one(
                doc! { "name": list_name },
                doc! { "$push": { "items": { "_id": item.id, "name": item.name } } },
            )
            .upsert(true)
            .await?;

        if result.upserted_id.is_some() {
            debug!(list = %list_name, "list created by item insert");
        }
        Ok(())
    }

    async fn pull_item(&self, list_name: &str, id: ObjectId) -> AppResult<bool> {
        let before = self
            .lists
            .find_one_and_update(
                doc! { "name": list_name },
                doc! { "$pull": { "items": { "_id": id } } },
            )
            .await?;
        Ok(before.is_some())
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        info!("mongodb client closed");
    }
}

/// Process-local store with the same semantics as the MongoDB backend.
/// Documents keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTodoListRepository {
    items: RwLock<Vec<TodoItem>>,
    lists: RwLock<Vec<TodoList>>,
}

impl InMemoryTodoListRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list_count(&self) -> usize {
        self.lists.read().await.len()
    }
}

#[async_trait]
impl TodoListRepository for InMemoryTodoListRepository {
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }

    async fn default_items(&self) -> AppResult<Vec<TodoItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn add_default_item(&self, item: TodoItem) -> AppResult<()> {
        self.items.write().await.push(item);
        Ok(())
    }

    async fn remove_default_item(&self, id: ObjectId) -> AppResult<bool> {
        let mut items = self.items.write().await;
        match items.iter().position(|item| item.id == id) {
            Some(index) => {
                items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_list(&self, name: &str) -> AppResult<Option<TodoList>> {
        let lists = self.lists.read().await;
        Ok(lists.iter().find(|list| list.name == name).cloned())
    }

    async fn create_list(&self, name: &str) -> AppResult<TodoList> {
        let list = TodoList::empty(name);
        self.lists.write().await.push(list.clone());
        Ok(list)
    }

    async fn push_item(&self, list_name: &str, item: TodoItem) -> AppResult<()> {
        let mut lists = self.lists.write().await;
        match lists.iter_mut().find(|list| list.name == list_name) {
            Some(list) => list.items.push(item),
            None => {
                let mut list = TodoList::empty(list_name);
                list.items.push(item);
                lists.push(list);
            }
        }
        Ok(())
    }

    async fn pull_item(&self, list_name: &str, id: ObjectId) -> AppResult<bool> {
        let mut lists = self.lists.write().await;
        let Some(list) = lists.iter_mut().find(|list| list.name == list_name) else {
            return Ok(false);
        };
        list.items.retain(|item| item.id != id);
        Ok(true)
    }
}
