use super::*;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Add(String, ListFlags),
    Update(String, ListFlags),
    Remove(String),
}

/// In-memory server: keeps rows, records mutations, can be told to fail.
#[derive(Default)]
struct FakeStore {
    rows: Mutex<HashMap<String, ListEntry>>,
    calls: Mutex<Vec<Call>>,
    next_error: Mutex<Option<String>>,
    fail_fetch: AtomicBool,
    /// The next N fetches read the rows, then answer late.
    late_fetches: AtomicUsize,
    delay: Option<Duration>,
}

impl FakeStore {
    fn with_rows(rows: Vec<(&str, ListFlags)>) -> Self {
        let store = FakeStore::default();
        {
            let mut map = store.rows.lock().unwrap();
            for (id, flags) in rows {
                map.insert(id.to_string(), ListEntry::new(&movie(id), flags));
            }
        }
        store
    }

    fn slow(delay: Duration) -> Self {
        FakeStore {
            delay: Some(delay),
            ..FakeStore::default()
        }
    }

    fn fail_next(&self, message: &str) {
        *self.next_error.lock().unwrap() = Some(message.to_string());
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn mutate(&self, call: Call) -> Result<String, ApiError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(call.clone());
        if let Some(error) = self.next_error.lock().unwrap().take() {
            return Err(ApiError::Server(error));
        }
        let mut rows = self.rows.lock().unwrap();
        match call {
            Call::Add(id, flags) => {
                rows.insert(id.clone(), ListEntry::new(&movie(&id), flags));
                Ok("Successfully added movie.".to_string())
            }
            Call::Update(id, flags) => match rows.get_mut(&id) {
                Some(entry) => {
                    entry.set_flags(flags);
                    Ok("Successfully updated movie.".to_string())
                }
                None => Err(ApiError::Server("Movie not found.".to_string())),
            },
            Call::Remove(id) => match rows.remove(&id) {
                Some(_) => Ok("Movie removed successfully.".to_string()),
                None => Err(ApiError::Server("Movie not found in user's list.".to_string())),
            },
        }
    }
}

#[async_trait]
impl MovieStore for FakeStore {
    async fn add_to_list(
        &self,
        _user_id: &str,
        movie: &MovieRef,
        flags: ListFlags,
    ) -> Result<String, ApiError> {
        self.mutate(Call::Add(movie.id.clone(), flags)).await
    }

    async fn update_in_list(
        &self,
        _user_id: &str,
        movie_id: &str,
        flags: ListFlags,
    ) -> Result<String, ApiError> {
        self.mutate(Call::Update(movie_id.to_string(), flags)).await
    }

    async fn remove_from_list(&self, _user_id: &str, movie_id: &str) -> Result<String, ApiError> {
        self.mutate(Call::Remove(movie_id.to_string())).await
    }

    async fn fetch_list(&self, _user_id: &str, filter: ListFilter) -> Result<Vec<ListEntry>, ApiError> {
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(ApiError::Server("list unavailable".to_string()));
        }
        let wanted = filter.flags();
        let rows: Vec<ListEntry> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.watched == wanted.watched() && e.favourite == wanted.favourite())
            .cloned()
            .collect();
        let late = self
            .late_fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if late {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        Ok(rows)
    }
}

fn movie(id: &str) -> MovieRef {
    MovieRef::new(id, format!("Movie {}", id), None)
}

fn reconciler(store: FakeStore) -> (Arc<FakeStore>, ListStateReconciler<FakeStore>) {
    let store = Arc::new(store);
    let reconciler = ListStateReconciler::new(Arc::clone(&store), "u1");
    (store, reconciler)
}

#[tokio::test]
async fn test_refresh_loads_all_filters() {
    let (_, reconciler) = reconciler(FakeStore::with_rows(vec![
        ("m1", ListFlags::TO_WATCH),
        ("m2", ListFlags::WATCHED),
        ("m3", ListFlags::FAVOURITE),
    ]));
    reconciler.refresh().await.unwrap();

    let state = reconciler.snapshot().await;
    assert_eq!(state.len(), 3);
    assert_eq!(state.membership("m1"), Membership::ToWatch);
    assert_eq!(state.membership("m2"), Membership::Watched { favourite: false });
    assert_eq!(state.membership("m3"), Membership::Watched { favourite: true });
    assert_eq!(reconciler.status(), OperationStatus::Succeeded(None));
}

#[tokio::test]
async fn test_three_cycles_issue_add_update_remove() {
    let (store, reconciler) = reconciler(FakeStore::default());
    let m1 = movie("m1");

    assert_eq!(reconciler.cycle(&m1).await.unwrap(), Membership::ToWatch);
    assert_eq!(
        reconciler.cycle(&m1).await.unwrap(),
        Membership::Watched { favourite: false }
    );
    assert_eq!(reconciler.cycle(&m1).await.unwrap(), Membership::NotInList);

    assert_eq!(
        store.calls(),
        vec![
            Call::Add("m1".to_string(), ListFlags::TO_WATCH),
            Call::Update("m1".to_string(), ListFlags::WATCHED),
            Call::Remove("m1".to_string()),
        ]
    );
    assert_eq!(reconciler.membership("m1").await, Membership::NotInList);
}

#[tokio::test]
async fn test_favourite_from_not_in_list_is_one_add() {
    let (store, reconciler) = reconciler(FakeStore::default());
    let membership = reconciler.toggle_favourite(&movie("m1")).await.unwrap();

    assert_eq!(membership, Membership::Watched { favourite: true });
    assert_eq!(store.calls(), vec![Call::Add("m1".to_string(), ListFlags::FAVOURITE)]);
    assert!(reconciler.membership("m1").await.is_favourite());
}

#[tokio::test]
async fn test_favourite_off_stays_watched() {
    let (store, reconciler) = reconciler(FakeStore::with_rows(vec![("m1", ListFlags::FAVOURITE)]));
    reconciler.refresh().await.unwrap();

    let membership = reconciler.toggle_favourite(&movie("m1")).await.unwrap();
    assert_eq!(membership, Membership::Watched { favourite: false });
    assert_eq!(store.calls(), vec![Call::Update("m1".to_string(), ListFlags::WATCHED)]);
    assert_eq!(
        reconciler.membership("m1").await,
        Membership::Watched { favourite: false }
    );
}

#[tokio::test]
async fn test_failed_remove_keeps_movie_and_surfaces_error() {
    let (store, reconciler) = reconciler(FakeStore::with_rows(vec![("m1", ListFlags::WATCHED)]));
    reconciler.refresh().await.unwrap();
    store.fail_next("Movie not found in user's list.");

    let err = reconciler.remove_from_list("m1").await.unwrap_err();
    assert_eq!(err.to_string(), "Movie not found in user's list.");
    assert!(reconciler.snapshot().await.contains("m1"));
    assert_eq!(
        reconciler.status(),
        OperationStatus::Failed("Movie not found in user's list.".to_string())
    );
}

#[tokio::test]
async fn test_successful_remove_drops_only_that_movie() {
    let (_, reconciler) = reconciler(FakeStore::with_rows(vec![
        ("m1", ListFlags::WATCHED),
        ("m2", ListFlags::TO_WATCH),
        ("m3", ListFlags::FAVOURITE),
    ]));
    reconciler.refresh().await.unwrap();

    let message = reconciler.remove_from_list("m2").await.unwrap();
    assert_eq!(message, "Movie removed successfully.");

    let state = reconciler.snapshot().await;
    assert!(!state.contains("m2"));
    assert!(state.contains("m1"));
    assert!(state.contains("m3"));
    assert_eq!(
        reconciler.status(),
        OperationStatus::Succeeded(Some("Movie removed successfully.".to_string()))
    );
}

#[tokio::test]
async fn test_failed_gesture_leaves_membership_unchanged() {
    let (store, reconciler) = reconciler(FakeStore::with_rows(vec![("m1", ListFlags::TO_WATCH)]));
    reconciler.refresh().await.unwrap();
    store.fail_next("Failed to update movie.");

    let err = reconciler.cycle(&movie("m1")).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to update movie.");
    assert_eq!(reconciler.membership("m1").await, Membership::ToWatch);
}

#[tokio::test]
async fn test_command_error_wins_over_refresh_error() {
    let (store, reconciler) = reconciler(FakeStore::default());
    store.fail_next("Failed to add movie.");
    store.fail_fetch.store(true, Ordering::SeqCst);

    let err = reconciler.cycle(&movie("m1")).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to add movie.");
    assert_eq!(reconciler.membership("m1").await, Membership::NotInList);
}

#[tokio::test]
async fn test_refresh_error_after_successful_command() {
    let (store, reconciler) = reconciler(FakeStore::default());
    store.fail_fetch.store(true, Ordering::SeqCst);

    let err = reconciler.cycle(&movie("m1")).await.unwrap_err();
    assert_eq!(err.to_string(), "list unavailable");
    // The command went through, so the committed membership stays.
    assert_eq!(reconciler.membership("m1").await, Membership::ToWatch);
}

#[tokio::test]
async fn test_concurrent_gestures_on_one_movie_serialize() {
    let (store, reconciler) = reconciler(FakeStore::slow(Duration::from_millis(20)));
    let m1 = movie("m1");

    let (first, second) = tokio::join!(reconciler.cycle(&m1), reconciler.cycle(&m1));
    assert_eq!(first.unwrap(), Membership::ToWatch);
    assert_eq!(second.unwrap(), Membership::Watched { favourite: false });
    assert_eq!(
        store.calls(),
        vec![
            Call::Add("m1".to_string(), ListFlags::TO_WATCH),
            Call::Update("m1".to_string(), ListFlags::WATCHED),
        ]
    );
}

#[tokio::test]
async fn test_gestures_on_different_movies_both_commit() {
    let (store, reconciler) = reconciler(FakeStore::slow(Duration::from_millis(10)));
    let (m1, m2) = (movie("m1"), movie("m2"));
    let (a, b) = tokio::join!(reconciler.cycle(&m1), reconciler.toggle_favourite(&m2));
    assert_eq!(a.unwrap(), Membership::ToWatch);
    assert_eq!(b.unwrap(), Membership::Watched { favourite: true });
    assert_eq!(store.calls().len(), 2);

    let state = reconciler.snapshot().await;
    assert_eq!(state.membership("m1"), Membership::ToWatch);
    assert!(state.membership("m2").is_favourite());
}

#[tokio::test]
async fn test_stale_refresh_does_not_drop_other_commit() {
    let store = FakeStore::default();
    // The refresh after m1 reads the server before m2 is added.
    store.late_fetches.store(3, Ordering::SeqCst);
    let (store, reconciler) = reconciler(store);
    let (m1, m2) = (movie("m1"), movie("m2"));

    let (a, b) = tokio::join!(reconciler.cycle(&m1), reconciler.cycle(&m2));
    assert_eq!(a.unwrap(), Membership::ToWatch);
    assert_eq!(b.unwrap(), Membership::ToWatch);

    let state = reconciler.snapshot().await;
    assert_eq!(state.membership("m1"), Membership::ToWatch);
    assert_eq!(state.membership("m2"), Membership::ToWatch);

    assert_eq!(
        reconciler.cycle(&m2).await.unwrap(),
        Membership::Watched { favourite: false }
    );
    assert_eq!(
        store.calls(),
        vec![
            Call::Add("m1".to_string(), ListFlags::TO_WATCH),
            Call::Add("m2".to_string(), ListFlags::TO_WATCH),
            Call::Update("m2".to_string(), ListFlags::WATCHED),
        ]
    );
}

#[tokio::test]
async fn test_refresh_after_commit_is_applied() {
    let (store, reconciler) = reconciler(FakeStore::default());
    reconciler.add_to_list(&movie("m1"), ListFlags::TO_WATCH).await.unwrap();
    store
        .rows
        .lock()
        .unwrap()
        .insert("m5".to_string(), ListEntry::new(&movie("m5"), ListFlags::WATCHED));

    reconciler.refresh().await.unwrap();
    let state = reconciler.snapshot().await;
    assert!(state.contains("m1"));
    assert!(state.contains("m5"));
}

#[tokio::test]
async fn test_update_in_list_commits_flags() {
    let (_, reconciler) = reconciler(FakeStore::with_rows(vec![("m1", ListFlags::TO_WATCH)]));
    reconciler.refresh().await.unwrap();

    reconciler.update_in_list("m1", ListFlags::FAVOURITE).await.unwrap();
    assert!(reconciler.membership("m1").await.is_favourite());
}

#[tokio::test]
async fn test_add_to_list_commits_entry() {
    let (_, reconciler) = reconciler(FakeStore::default());
    reconciler.add_to_list(&movie("m9"), ListFlags::WATCHED).await.unwrap();
    assert_eq!(
        reconciler.membership("m9").await,
        Membership::Watched { favourite: false }
    );
}

#[tokio::test]
async fn test_fetch_list_single_filter() {
    let (_, reconciler) = reconciler(FakeStore::with_rows(vec![
        ("m1", ListFlags::TO_WATCH),
        ("m2", ListFlags::WATCHED),
    ]));
    let to_watch = reconciler.fetch_list(ListFilter::ToWatch).await.unwrap();
    assert_eq!(to_watch.len(), 1);
    assert_eq!(to_watch[0].movie_id, "m1");
}

#[tokio::test]
async fn test_subscribers_see_final_status() {
    let (_, reconciler) = reconciler(FakeStore::default());
    let mut rx = reconciler.subscribe();

    reconciler.cycle(&movie("m1")).await.unwrap();
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        *rx.borrow_and_update(),
        OperationStatus::Succeeded(Some("Successfully added movie.".to_string()))
    );
}
