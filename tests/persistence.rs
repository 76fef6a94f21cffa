use items::{
  model::NewItem,
  state::{AppState, Config},
};

#[tokio::test]
async fn items_survive_reconnect() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("items.db");
  let config = Config {
    database_url: format!("sqlite://{}?mode=rwc", path.display()),
    ..Config::default()
  };

  let id = {
    let app = AppState::new(config.clone()).await.unwrap();
    let item =
      app.sv().item.create(NewItem::new("Widget", "Tools")).await.unwrap();
    app.db.clone().close().await.unwrap();
    item.id
  };

  let app = AppState::new(config).await.unwrap();
  let item = app.sv().item.get(id).await.unwrap();
  assert_eq!(item.name, "Widget");
  assert_eq!(app.sv().item.count().await.unwrap(), 1);
}
