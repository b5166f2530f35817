use anyhow::{Context, Result};
use todo_lists::{
    config::{AppConfig, StoreBackend},
    models::TodoItem,
    repository::{MongoTodoListRepository, TodoListRepository},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to read configuration")?;

    if config.store_backend != StoreBackend::MongoDb {
        anyhow::bail!("seeding only applies to the mongodb backend");
    }

    let repo = MongoTodoListRepository::connect(&config.mongodb_uri, &config.mongodb_database)
        .await
        .context("failed to configure MongoDB client")?;
    repo.init().await.context("failed to reach MongoDB")?;

    let names = [
        "Welcome to your todolist!",
        "Hit the + button to add a new item.",
        "<-- Hit this to delete an item.",
    ];

    for name in names {
        let item = TodoItem::new(name).context("seed item must have a name")?;
        repo.add_default_item(item)
            .await
            .context("failed to insert seed item")?;
    }

    repo.shutdown().await;
    println!("Seed data inserted successfully");
    Ok(())
}
