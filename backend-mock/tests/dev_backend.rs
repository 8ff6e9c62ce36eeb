//! End-to-end exercises of the development client through the portable
//! `BackendClient` contract, the way application code consumes it.

use backend_mock::{MockAuthOptions, MockBackendClient};
use backend_traits::{ApiError, AuthChange, BackendClient, Credentials};
use bytes::Bytes;
use local_store::FileStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

async fn dev_client() -> (Arc<dyn BackendClient>, Arc<FileStore>) {
    let store = Arc::new(FileStore::in_memory().await.unwrap());
    let client: Arc<dyn BackendClient> = Arc::new(MockBackendClient::new(Arc::clone(&store)));
    (client, store)
}

#[tokio::test]
async fn upload_get_remove_scenario() {
    let (client, store) = dev_client().await;

    // Upload a ten-byte image and confirm the reported path.
    let uploaded = client
        .storage()
        .upload("a/b.png", Bytes::from_static(b"0123456789"))
        .await
        .unwrap();
    assert_eq!(uploaded.path, "a/b.png");

    // The application's local cache reads the same bytes back.
    let blob = store.get("a/b.png").await.unwrap().unwrap();
    assert_eq!(blob.len(), 10);
    assert_eq!(&blob[..], b"0123456789");

    // After removal the path is absent, not an error.
    client
        .storage()
        .remove(&["a/b.png".to_string()])
        .await
        .unwrap();
    assert!(store.get("a/b.png").await.unwrap().is_none());
}

#[tokio::test]
async fn download_failure_forces_local_fallback() {
    let (client, store) = dev_client().await;

    client
        .storage()
        .upload("covers/front.jpg", Bytes::from_static(b"jpeg bytes"))
        .await
        .unwrap();

    // The fetch path reports failure, so the app falls back to its cache.
    let err = client.storage().download("covers/front.jpg").await.unwrap_err();
    assert_eq!(err, ApiError::DownloadUnsupported);

    let cached = store.get("covers/front.jpg").await.unwrap().unwrap();
    assert_eq!(&cached[..], b"jpeg bytes");
}

#[tokio::test]
async fn auth_lifecycle_with_subscribers() {
    let store = Arc::new(FileStore::in_memory().await.unwrap());
    let client: Arc<dyn BackendClient> = Arc::new(MockBackendClient::with_options(
        store,
        MockAuthOptions {
            initially_signed_in: false,
        },
    ));

    let events: Arc<Mutex<Vec<AuthChange>>> = Arc::new(Mutex::new(Vec::new()));
    let events_cb = Arc::clone(&events);
    let subscription = client.auth().on_auth_state_change(Box::new(move |change, _session| {
        events_cb.lock().unwrap().push(change);
    }));

    // Deferred initial notification reflects the signed-out state.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(events.lock().unwrap().clone(), vec![AuthChange::SignedOut]);

    // Signing in flips the state, returns a session and notifies.
    let signed_in = client
        .auth()
        .sign_in_with_password(Credentials::new("anyone@example.com", "ignored"))
        .await
        .unwrap();
    assert_eq!(signed_in.session.user.id, signed_in.user.id);
    assert!(client.auth().get_user().await.unwrap().is_some());

    client.auth().sign_out().await.unwrap();
    assert!(client.auth().get_user().await.unwrap().is_none());

    assert_eq!(
        events.lock().unwrap().clone(),
        vec![
            AuthChange::SignedOut,
            AuthChange::SignedIn,
            AuthChange::SignedOut
        ]
    );

    // After unsubscribing, further transitions are silent.
    assert!(subscription.unsubscribe());
    client
        .auth()
        .sign_in_with_password(Credentials::new("again", "ignored"))
        .await
        .unwrap();
    assert_eq!(events.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn public_url_resolution_is_deferred_to_the_caller() {
    let (client, _store) = dev_client().await;
    assert_eq!(
        client.storage().get_public_url("gallery/1.png"),
        "gallery/1.png"
    );
}

#[tokio::test]
async fn uploads_from_concurrent_tasks_all_land() {
    let (client, store) = dev_client().await;
    let uploads = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = Arc::clone(&client);
        let uploads = Arc::clone(&uploads);
        handles.push(tokio::spawn(async move {
            let path = format!("bulk/{i}");
            client
                .storage()
                .upload(&path, Bytes::from(vec![i as u8; 4]))
                .await
                .unwrap();
            uploads.fetch_add(1, Ordering::SeqCst);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(uploads.load(Ordering::SeqCst), 8);
    for i in 0..8 {
        let blob = store.get(&format!("bulk/{i}")).await.unwrap().unwrap();
        assert_eq!(&blob[..], &vec![i as u8; 4][..]);
    }
}
