mod common;

use serde_json::Value;

#[tokio::test]
async fn test_domains_list_sorted() {
    let server = common::default_server();

    let response = server.get("/api/domains").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let hosts: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["host"].as_str().unwrap())
        .collect();

    assert_eq!(
        hosts,
        vec![
            "blog.example.com",
            "cdn.example.com",
            "example.com",
            "myblog.org",
            "shop.example.com"
        ]
    );
    assert_eq!(json["total"], 5);
}

#[tokio::test]
async fn test_domains_list_structure() {
    let server = common::default_server();

    let response = server.get("/api/domains").await;

    let json = response.json::<Value>();
    let item = &json["items"][0];
    assert!(item.get("host").is_some());
    assert!(item.get("tenant_id").is_some());
}

#[tokio::test]
async fn test_domains_filter_by_tenant() {
    let server = common::default_server();

    let response = server
        .get("/api/domains")
        .add_query_param("tenant_id", 2)
        .await;

    let json = response.json::<Value>();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| item["tenant_id"] == 2));
}

#[tokio::test]
async fn test_domains_single_tenant() {
    let server = common::unconfigured_server();

    let response = server.get("/api/domains").await;

    let json = response.json::<Value>();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["host"], "cdn.example.com");
    assert_eq!(items[1]["host"], "example.com");
}
