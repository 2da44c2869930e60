use crate::error::Result;
use crate::loader::source::ReportSource;
use crate::report::ReportCollection;
use tokio::sync::oneshot;

/// Receiving half of a pending load.
pub type LoadReceiver = oneshot::Receiver<Result<ReportCollection>>;

/// Run the one-shot fetch on a background task.
///
/// There is no retry, polling or cancellation: the task lives until the source answers or the
/// receiver is dropped.
pub fn spawn_loader(source: Box<dyn ReportSource>) -> LoadReceiver {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let description = source.describe();
        let outcome = source.fetch().await;
        match &outcome {
            Ok(collection) => log::info!(
                "loaded {} reports from {}",
                collection.len(),
                description
            ),
            Err(err) => log::debug!("load from {} failed: {}", description, err),
        }
        // Receiver gone means the dashboard already quit.
        let _ = tx.send(outcome);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use crate::report::StockReport;
    use async_trait::async_trait;

    struct StaticSource(Option<ReportCollection>);

    #[async_trait]
    impl ReportSource for StaticSource {
        async fn fetch(&self) -> Result<ReportCollection> {
            self.0
                .clone()
                .ok_or_else(|| DashError::invalid_source("static failure"))
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[tokio::test]
    async fn test_loader_delivers_collection() {
        let collection = ReportCollection::new(
            "2024-03-02T08:30:00Z",
            vec![StockReport::new("TW01", "Foo", 85.0, "2024-03-01")],
        );
        let rx = spawn_loader(Box::new(StaticSource(Some(collection.clone()))));
        assert_eq!(rx.await.unwrap().unwrap(), collection);
    }

    #[tokio::test]
    async fn test_loader_delivers_failure() {
        let rx = spawn_loader(Box::new(StaticSource(None)));
        let err = rx.await.unwrap().unwrap_err();
        assert!(err.is_load_failure());
    }
}
