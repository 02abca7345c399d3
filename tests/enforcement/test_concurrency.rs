// Concurrent lints share one linter and one whitelist.

use std::sync::Arc;

use clint_core::whitelist::WhitelistConfig;

use super::common::{mock_linter, REJECTED_CONTRACT, TOKEN_CONTRACT};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_lints_are_independent() {
    let (linter, mock) = mock_linter();
    let whitelist = Arc::new(WhitelistConfig::default());
    let expected_clean = linter.lint_blocking(TOKEN_CONTRACT, &whitelist);
    let expected_dirty = linter.lint_blocking(REJECTED_CONTRACT, &whitelist);

    let mut handles = Vec::new();
    for i in 0..16 {
        let linter = Arc::clone(&linter);
        let whitelist = Arc::clone(&whitelist);
        let source: Arc<str> = if i % 2 == 0 {
            Arc::from(TOKEN_CONTRACT)
        } else {
            Arc::from(REJECTED_CONTRACT)
        };
        handles.push(tokio::spawn(async move {
            (i, linter.lint(source, whitelist).await)
        }));
    }

    for handle in handles {
        let (i, result) = handle.await.unwrap();
        if i % 2 == 0 {
            assert_eq!(result, expected_clean);
        } else {
            assert_eq!(result, expected_dirty);
        }
    }
    assert_eq!(mock.calls(), 18);
}

#[test]
fn test_parallel_blocking_lints() {
    let (linter, _mock) = mock_linter();
    let whitelist = WhitelistConfig::default();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| linter.lint_blocking(REJECTED_CONTRACT, &whitelist)))
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    });
}
