//! Classification and mount benchmarks.
//!
//! Run with: cargo bench --bench classify
//! Results saved to: target/criterion/

use std::hint::black_box;

use async_trait::async_trait;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use game_embed::{
    EmbedResolver, EmbedState, EmbedTarget, FrameHost, HostPolicy, HostRule, MountId, Navigator,
    ResolverOptions, Result,
};
use tokio::runtime::Runtime;
use url::Url;

// ============================================================================
// Environment
// ============================================================================

struct NullHost;

impl FrameHost for NullHost {
    fn mount_frame(&self, _mount_id: MountId, _target: &EmbedTarget) -> Result<()> {
        Ok(())
    }

    fn unmount_frame(&self, _mount_id: MountId) {}

    fn request_fullscreen(&self, _mount_id: MountId) -> Result<()> {
        Ok(())
    }
}

struct NullNavigator;

#[async_trait]
impl Navigator for NullNavigator {
    async fn open_new_context(&self, _url: &Url) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Benchmark Parameters
// ============================================================================

const URLS: &[&str] = &[
    "https://example.org/game",
    "https://www.y8.com/games/foo",
    "https://html-classic.itch.zone/html/1234/index.html",
    "https://a.b.c.d.e.gamedistribution.com/x",
    "http://127.0.0.1:8080/",
];

const RULE_COUNTS: &[usize] = &[3, 100, 1000];

// ============================================================================
// Benchmark: Classify
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let urls: Vec<Url> = URLS.iter().map(|u| Url::parse(u).unwrap()).collect();

    let mut group = c.benchmark_group("classify");

    for &count in RULE_COUNTS {
        let mut options = ResolverOptions::default();
        for i in 3..count {
            options = options.with_rule(HostRule::frame_blocking(format!("arcade{i}.test")));
        }
        let policy = HostPolicy::from_options(&options).unwrap();

        group.bench_with_input(BenchmarkId::new("rules", count), &policy, |b, policy| {
            b.iter(|| {
                for url in &urls {
                    black_box(policy.classify(black_box(url)));
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Mount To Embedded
// ============================================================================

fn bench_mount(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = EmbedResolver::builder()
        .host(NullHost)
        .navigator(NullNavigator)
        .build()
        .unwrap();
    let target = EmbedTarget::new("https://www.y8.com/games/foo", "Foo").unwrap();

    c.bench_function("mount_load_unmount", |b| {
        b.to_async(&rt).iter(|| {
            let resolver = resolver.clone();
            let target = target.clone();
            async move {
                let handle = resolver.mount(target).unwrap();
                handle.signals().load().unwrap();
                let state = handle.wait_resolved().await.unwrap();
                assert_eq!(state, EmbedState::Embedded);
                handle.unmount().await;
            }
        });
    });
}

criterion_group!(benches, bench_classify, bench_mount);
criterion_main!(benches);
