//! # Bazaar Subsystem Benchmarks
//!
//! | Subsystem | Hot path |
//! |-----------|----------|
//! | bz-01 Metered Stream | reporter update per read/write |
//! | bz-02 Order Gateway | transition table lookup |
//! | bz-03 Moderator Discovery | multiaddr parse + identity decode |

use bz_01_metered_stream::{BandwidthCounter, BandwidthReporter};
use bz_02_order_gateway::domain::{next_state, Operation};
use bz_03_moderator_discovery::domain::{encode_identity, moderator_from_record, pointer_for};
use bz_03_moderator_discovery::PeerRecord;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{OrderState, PaymentMethod, PeerId, ProtocolId, Side};
use std::sync::Arc;
use std::thread;

// ============================================================================
// BZ-01: Bandwidth counter
// ============================================================================

fn bench_bandwidth_counter(c: &mut Criterion) {
    let mut group = c.benchmark_group("bz-01-bandwidth-counter");
    group.throughput(Throughput::Elements(1));

    let protocol = ProtocolId::new("/bazaar/app/1.0.0");
    let peers: Vec<PeerId> = (0..64).map(|i| PeerId::new(format!("QmPeer{i}"))).collect();

    group.bench_function("single_thread", |b| {
        let counter = BandwidthCounter::new();
        let mut i = 0usize;
        b.iter(|| {
            counter.log_recv_stream(black_box(1024), &protocol, &peers[i % peers.len()]);
            i += 1;
        });
    });

    for threads in [2usize, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("contended", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let counter = Arc::new(BandwidthCounter::new());
                    let handles: Vec<_> = (0..threads)
                        .map(|t| {
                            let counter = Arc::clone(&counter);
                            let protocol = protocol.clone();
                            let peer = peers[t % peers.len()].clone();
                            thread::spawn(move || {
                                for _ in 0..1_000 {
                                    counter.log_sent_stream(512, &protocol, &peer);
                                }
                            })
                        })
                        .collect();
                    for h in handles {
                        let _ = h.join();
                    }
                    black_box(counter.totals())
                });
            },
        );
    }
    group.finish();
}

// ============================================================================
// BZ-02: Transition policy
// ============================================================================

fn bench_transition_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("bz-02-transitions");

    group.bench_function("allowed", |b| {
        b.iter(|| {
            next_state(
                black_box(Operation::OpenDispute),
                black_box(Side::Purchase),
                black_box(OrderState::Fulfilled),
                true,
                PaymentMethod::Moderated,
            )
        });
    });

    group.bench_function("refused", |b| {
        b.iter(|| {
            next_state(
                black_box(Operation::Confirm),
                black_box(Side::Sale),
                black_box(OrderState::Completed),
                true,
                PaymentMethod::Direct,
            )
        });
    });
    group.finish();
}

// ============================================================================
// BZ-03: Identity decoding
// ============================================================================

fn bench_identity_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bz-03-identity");

    let peer = pointer_for(b"moderator");
    let value = encode_identity(&peer).expect("peer id fits a multihash");
    let direct = PeerRecord::new(
        peer.clone(),
        vec![format!("/ip4/10.0.0.1/tcp/4001/ipfs/{value}")],
    );
    let late = PeerRecord::new(
        peer.clone(),
        vec![
            "/ip4/10.0.0.1/tcp/4001".to_string(),
            "/dnsaddr/relay.example/p2p-circuit".to_string(),
            format!("/ip6/::1/tcp/4001/p2p/{value}"),
        ],
    );

    group.bench_function("first_address", |b| {
        b.iter(|| moderator_from_record(black_box(&direct)))
    });
    group.bench_function("third_address", |b| {
        b.iter(|| moderator_from_record(black_box(&late)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_bandwidth_counter,
    bench_transition_lookup,
    bench_identity_decode
);
criterion_main!(benches);
