//! Independence of concurrent requests.

use std::time::{Duration, Instant};

use cors_proxy::ProxyConfig;

mod common;

use common::{client, start_proxy, start_upstream};

#[tokio::test]
async fn fast_target_is_not_delayed_by_slow_target() {
    let upstream = start_upstream().await;
    let proxy = start_proxy(ProxyConfig::default()).await;
    let client = client();

    let slow_url = proxy.url(&format!("http://{upstream}/delay"), &[("ms", "2000")]);
    let slow_client = client.clone();
    let slow = tokio::spawn(async move {
        let start = Instant::now();
        let res = slow_client.get(slow_url).send().await.unwrap();
        let body = res.text().await.unwrap();
        (body, start.elapsed())
    });

    // Let the slow request reach the upstream first.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let start = Instant::now();
    let res = client
        .get(proxy.url(&format!("http://{upstream}/status/200"), &[]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "status 200");
    let fast_elapsed = start.elapsed();

    assert!(fast_elapsed < Duration::from_millis(1000), "{fast_elapsed:?}");

    let (slow_body, slow_elapsed) = slow.await.unwrap();
    assert_eq!(slow_body, "delayed");
    assert!(slow_elapsed >= Duration::from_millis(2000), "{slow_elapsed:?}");
}

#[tokio::test]
async fn many_concurrent_requests_all_succeed() {
    let upstream = start_upstream().await;
    let proxy = start_proxy(ProxyConfig::default()).await;
    let client = client();

    let concurrency = 20;
    let requests_per_task = 10;

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let task_param = task.to_string();
        let url = proxy.url(&format!("http://{upstream}/echo"), &[("task", task_param.as_str())]);
        tasks.push(tokio::spawn(async move {
            let mut ok = 0;
            for _ in 0..requests_per_task {
                let res = client.get(&url).send().await.unwrap();
                if res.status().is_success() {
                    let echo: common::Echo = res.json().await.unwrap();
                    assert_eq!(echo.query, Some(format!("task={task}")));
                    ok += 1;
                }
            }
            ok
        }));
    }

    let mut total = 0;
    for task in tasks {
        total += task.await.unwrap();
    }
    assert_eq!(total, concurrency * requests_per_task);
}
