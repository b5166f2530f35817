use mongodb::bson::oid::ObjectId;
use todo_lists::{
    models::TodoItem,
    repository::{MongoTodoListRepository, TodoListRepository},
};

async fn connect() -> MongoTodoListRepository {
    let uri = std::env::var("MONGODB_TEST_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("todo_lists_test_{}", ObjectId::new().to_hex());

    let repo = MongoTodoListRepository::connect(&uri, &database)
        .await
        .expect("client should configure");
    repo.init().await.expect("mongodb should answer ping");
    repo
}

#[tokio::test]
#[ignore = "requires a running MongoDB (set MONGODB_TEST_URI)"]
async fn mongodb_repository_crud_flow() {
    let repo = connect().await;

    let milk = TodoItem::new("Buy milk").expect("valid item");
    repo.add_default_item(milk.clone())
        .await
        .expect("insert should succeed");
    assert_eq!(
        repo.default_items().await.expect("find should succeed"),
        vec![milk.clone()]
    );
    assert!(
        repo.remove_default_item(milk.id)
            .await
            .expect("delete should succeed")
    );
    assert!(repo.default_items().await.expect("find").is_empty());

    assert!(repo.find_list("Work").await.expect("find").is_none());
    repo.create_list("Work").await.expect("create should succeed");

    let items = ["one", "two", "three"].map(|name| TodoItem::new(name).expect("valid item"));
    for item in &items {
        repo.push_item("Work", item.clone())
            .await
            .expect("push should succeed");
    }

    assert!(
        repo.pull_item("Work", items[1].id)
            .await
            .expect("pull should succeed")
    );
    let work = repo
        .find_list("Work")
        .await
        .expect("find should succeed")
        .expect("list should exist");
    assert_eq!(work.items, vec![items[0].clone(), items[2].clone()]);

    repo.push_item("Errands", TodoItem::new("Post office").expect("valid item"))
        .await
        .expect("upsert should succeed");
    let errands = repo
        .find_list("Errands")
        .await
        .expect("find should succeed")
        .expect("list should be upserted");
    assert_eq!(errands.items.len(), 1);

    repo.database().drop().await.expect("test database drops");
    repo.shutdown().await;
}
