//! Full account lifecycle against the live mock server.
//!
//! Starts the mock server on a random port, then drives every operation
//! through `Client` and its default ureq transport over real HTTP. Transport
//! edge cases use a bare `TcpListener` serving one canned response.

use std::io::{Read, Write};
use std::net::SocketAddr;
use std::time::Duration;

use accounts_core::{Account, Attributes, Client, Error, UrlParameters};
use uuid::Uuid;

const ORG: &str = "eb0bd6f5-c3f5-44b2-b677-acd23cdde73c";

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn account(id: &str, name: &str) -> Account {
    Account::new(
        id,
        ORG,
        Attributes {
            country: "GB".to_string(),
            base_currency: "GBP".to_string(),
            bank_id: "400300".to_string(),
            bank_id_code: "GBDSC".to_string(),
            bic: "NWBKGB22".to_string(),
            name: vec![name.to_string()],
            account_classification: "Personal".to_string(),
            ..Attributes::default()
        },
    )
}

#[test]
fn crud_lifecycle() {
    let addr = start_server();
    let client = Client::with_timeout(&format!("http://{addr}"), Duration::from_secs(10));
    let accounts = &client.organisation.accounts;

    // Step 1: list — should be empty.
    assert!(accounts.list(None).unwrap().is_empty(), "expected empty list");

    // Step 2: create two accounts.
    let first = account(&Uuid::new_v4().to_string(), "Samantha Holder");
    let created = accounts.create(&first).unwrap();
    assert_eq!(created, first);

    let second = account(&Uuid::new_v4().to_string(), "Jo Bloggs");
    accounts.create(&second).unwrap();

    // Step 3: creating the same id again conflicts.
    let err = accounts.create(&first).unwrap_err();
    let api = err.api().expect("expected an API error");
    assert_eq!(api.status_code, 409);
    assert_eq!(
        api.error_message,
        "Account cannot be created as it violates a duplicate constraint"
    );

    // Step 4: fetch is repeatable and returns what was stored.
    let fetched = accounts.fetch(&first.id).unwrap();
    assert_eq!(fetched, first);
    assert_eq!(accounts.fetch(&first.id).unwrap(), fetched);

    // Step 5: list, whole and paged.
    let all = accounts.list(None).unwrap();
    assert_eq!(all, vec![first.clone(), second.clone()]);

    let page = accounts.list(Some(&UrlParameters::page("1", "1"))).unwrap();
    assert_eq!(page, vec![second.clone()]);

    // Step 6: non-numeric page values are rejected by the server.
    let err = accounts.list(Some(&UrlParameters::page("one", "1"))).unwrap_err();
    assert_eq!(err.status_code(), Some(400));

    // Step 7: delete with a stale version.
    let err = accounts.delete(&first.id, 7).unwrap_err();
    assert_eq!(err.status_code(), Some(409));
    assert_eq!(err.api().unwrap().error_message, "invalid version");

    // Step 8: delete with the current version.
    accounts.delete(&first.id, fetched.version).unwrap();

    // Step 9: fetch and delete after delete — 404.
    assert_eq!(accounts.fetch(&first.id).unwrap_err().status_code(), Some(404));
    assert_eq!(accounts.delete(&first.id, 0).unwrap_err().status_code(), Some(404));

    // Step 10: only the second account is left.
    assert_eq!(accounts.list(None).unwrap(), vec![second]);
}

#[test]
fn concurrent_fetches_share_one_client() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}"));
    let seeded = account(&Uuid::new_v4().to_string(), "Shared");
    client.accounts().create(&seeded).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| client.accounts().fetch(&seeded.id).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), seeded);
        }
    });
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = Client::with_timeout(&format!("http://127.0.0.1:{port}"), Duration::from_secs(5));

    let err = client.accounts().fetch(&Uuid::new_v4().to_string()).unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}

/// Serve one canned `200` response to the first connection, then exit.
fn serve_once(body: Vec<u8>) -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
    });

    addr
}

#[test]
fn list_reads_bodies_past_ten_mebibytes() {
    let filler = "x".repeat(1000);
    let items: Vec<String> = (0..12_000)
        .map(|i| {
            format!(
                r#"{{"type":"accounts","id":"acc-{i}","organisation_id":"{ORG}","version":0,"attributes":{{"name":["{filler}"]}}}}"#
            )
        })
        .collect();
    let body = format!(r#"{{"data":[{}]}}"#, items.join(",")).into_bytes();
    assert!(body.len() > 10 * 1024 * 1024);

    let addr = serve_once(body);
    let client = Client::with_timeout(&format!("http://{addr}"), Duration::from_secs(30));

    let accounts = client.accounts().list(None).unwrap();
    assert_eq!(accounts.len(), 12_000);
    assert_eq!(accounts[0].id, "acc-0");
    assert_eq!(accounts[11_999].id, "acc-11999");
}
