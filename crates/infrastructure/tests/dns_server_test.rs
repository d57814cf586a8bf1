mod helpers;

use helpers::{a_values, MockBehavior, MockDnsServer, RecordBuilder};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use udns_application::services::{ForwarderSelector, RoutingSnapshot};
use udns_application::use_cases::HandleDnsQueryUseCase;
use udns_domain::config::ForwarderRule;
use udns_application::ports::AnswerCache;
use udns_domain::RecordType;
use udns_infrastructure::dns::forwarding::MessageBuilder;
use udns_infrastructure::dns::{DnsCache, DnsServerHandler, UpstreamForwarder};

const CLIENT: &str = "127.0.0.1:40000";

fn client() -> SocketAddr {
    CLIENT.parse().unwrap()
}

fn build_handler(
    cache: Arc<DnsCache>,
    nameservers: Vec<SocketAddr>,
    rules: Vec<ForwarderRule>,
) -> DnsServerHandler {
    let selector = Arc::new(ForwarderSelector::new(RoutingSnapshot::new(nameservers, rules)));
    let upstream = Arc::new(UpstreamForwarder::new(Duration::from_millis(500)));
    let use_case = Arc::new(HandleDnsQueryUseCase::new(cache, selector, upstream));
    DnsServerHandler::new(use_case)
}

fn request(name: &str) -> (u16, Vec<u8>) {
    MessageBuilder::build_query(name, &RecordType::A).unwrap()
}

#[tokio::test]
async fn test_cache_miss_forwards_and_caches() {
    let upstream = MockDnsServer::start(MockBehavior::Answer(vec![RecordBuilder::a(
        "example.com.",
        "93.184.216.34",
        300,
    )]))
    .await
    .unwrap();
    let cache = Arc::new(DnsCache::new());
    let handler = build_handler(cache.clone(), vec![upstream.addr()], vec![]);

    let (id, bytes) = request("example.com.");
    let reply = handler.handle_raw(&bytes, client()).await.unwrap();
    let reply = Message::from_vec(&reply).unwrap();

    assert_eq!(reply.id(), id);
    assert_eq!(reply.message_type(), MessageType::Response);
    assert!(reply.authoritative());
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(a_values(reply.answers()), vec![Ipv4Addr::new(93, 184, 216, 34)]);

    let cached = cache.get("example.com.", RecordType::A).unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].name, "example.com.");
}

#[tokio::test]
async fn test_second_query_served_from_cache() {
    let upstream = MockDnsServer::start(MockBehavior::Answer(vec![RecordBuilder::a(
        "example.com.",
        "93.184.216.34",
        300,
    )]))
    .await
    .unwrap();
    let cache = Arc::new(DnsCache::new());
    let handler = build_handler(cache, vec![upstream.addr()], vec![]);

    let (_, first) = request("example.com.");
    handler.handle_raw(&first, client()).await.unwrap();

    let (id, second) = request("EXAMPLE.com");
    let reply = Message::from_vec(&handler.handle_raw(&second, client()).await.unwrap()).unwrap();

    assert_eq!(reply.id(), id);
    assert_eq!(reply.answers().len(), 1);
    assert!(reply.answers()[0].ttl() <= 300);
    assert_eq!(upstream.udp_queries(), 1);
}

#[tokio::test]
async fn test_forwarder_rule_routes_to_dedicated_upstream() {
    let corp = MockDnsServer::start(MockBehavior::Answer(vec![RecordBuilder::a(
        "host.corp.example.",
        "10.0.0.7",
        60,
    )]))
    .await
    .unwrap();
    let public = MockDnsServer::start(MockBehavior::Answer(vec![])).await.unwrap();
    let handler = build_handler(
        Arc::new(DnsCache::new()),
        vec![public.addr()],
        vec![ForwarderRule::new("corp.example", corp.addr())],
    );

    let (_, bytes) = request("host.corp.example.");
    let reply = Message::from_vec(&handler.handle_raw(&bytes, client()).await.unwrap()).unwrap();

    assert_eq!(a_values(reply.answers()), vec![Ipv4Addr::new(10, 0, 0, 7)]);
    assert_eq!(corp.udp_queries(), 1);
    assert_eq!(public.udp_queries(), 0);
}

#[tokio::test]
async fn test_upstream_failure_still_replies() {
    let upstream = MockDnsServer::start(MockBehavior::Silent).await.unwrap();
    let cache = Arc::new(DnsCache::new());
    let handler = build_handler(cache.clone(), vec![upstream.addr()], vec![]);

    let (id, bytes) = request("down.example.");
    let reply = Message::from_vec(&handler.handle_raw(&bytes, client()).await.unwrap()).unwrap();

    assert_eq!(reply.id(), id);
    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert!(reply.answers().is_empty());
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_cached_cname_chases_to_cached_a() {
    let cache = Arc::new(DnsCache::new());
    cache.add(&RecordBuilder::cname("www.example.com.", "example.com.", 300));
    cache.add(&RecordBuilder::a("example.com.", "192.0.2.1", 300));
    let handler = build_handler(cache, vec!["127.0.0.1:9".parse().unwrap()], vec![]);

    let (_, bytes) = MessageBuilder::build_query("www.example.com.", &RecordType::CNAME).unwrap();
    let reply = Message::from_vec(&handler.handle_raw(&bytes, client()).await.unwrap()).unwrap();

    assert_eq!(reply.answers().len(), 2);
    assert_eq!(a_values(reply.answers()), vec![Ipv4Addr::new(192, 0, 2, 1)]);
}

#[tokio::test]
async fn test_malformed_request_is_dropped() {
    let handler = build_handler(
        Arc::new(DnsCache::new()),
        vec!["127.0.0.1:9".parse().unwrap()],
        vec![],
    );

    assert!(handler.handle_raw(&[0x01, 0x02, 0x03], client()).await.is_none());
}

#[tokio::test]
async fn test_punycode_name_served_from_cache() {
    let upstream = MockDnsServer::start(MockBehavior::Answer(vec![RecordBuilder::a(
        "xn--bcher-kva.example.",
        "192.0.2.10",
        300,
    )]))
    .await
    .unwrap();
    let cache = Arc::new(DnsCache::new());
    let handler = build_handler(cache.clone(), vec![upstream.addr()], vec![]);

    for _ in 0..2 {
        let (_, bytes) = request("xn--bcher-kva.example.");
        let reply = Message::from_vec(&handler.handle_raw(&bytes, client()).await.unwrap()).unwrap();
        assert_eq!(a_values(reply.answers()), vec![Ipv4Addr::new(192, 0, 2, 10)]);
    }

    assert_eq!(cache.len(), 1);
    assert_eq!(upstream.udp_queries(), 1);
    assert_eq!(cache.metrics_snapshot().hits, 1);
}

#[tokio::test]
async fn test_cname_to_punycode_target_chases_from_cache() {
    let cache = Arc::new(DnsCache::new());
    cache.add(&RecordBuilder::cname("www.example.com.", "xn--bcher-kva.example.", 300));
    cache.add(&RecordBuilder::a("xn--bcher-kva.example.", "192.0.2.10", 300));
    let handler = build_handler(cache.clone(), vec!["127.0.0.1:9".parse().unwrap()], vec![]);

    let (_, bytes) = MessageBuilder::build_query("www.example.com.", &RecordType::CNAME).unwrap();
    let reply = Message::from_vec(&handler.handle_raw(&bytes, client()).await.unwrap()).unwrap();

    assert_eq!(reply.answers().len(), 2);
    assert_eq!(a_values(reply.answers()), vec![Ipv4Addr::new(192, 0, 2, 10)]);

    // Only the question itself counts toward the hit rate.
    let stats = cache.metrics_snapshot();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 0);
}

#[tokio::test]
async fn test_notify_opcode_gets_no_reply() {
    let upstream = MockDnsServer::start(MockBehavior::Answer(vec![])).await.unwrap();
    let handler = build_handler(Arc::new(DnsCache::new()), vec![upstream.addr()], vec![]);

    let mut query = Query::new();
    query.set_name(Name::from_ascii("example.com.").unwrap());
    query.set_query_type(hickory_proto::rr::RecordType::SOA);
    query.set_query_class(DNSClass::IN);

    let mut notify = Message::new(4242, MessageType::Query, OpCode::Notify);
    notify.add_query(query);
    let bytes = MessageBuilder::serialize_message(&notify).unwrap();

    assert!(handler.handle_raw(&bytes, client()).await.is_none());
    assert_eq!(upstream.udp_queries(), 0);
}
