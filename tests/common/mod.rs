//! An in-process authoritative DNS server answering from a fixed zone.

#![allow(dead_code)]

use dnsclient::Config;
use std::collections::{HashMap, HashSet};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tokio::net::UdpSocket;
use trust_dns_proto::rr::rdata::{MX, SOA};
use trust_dns_server::authority::MessageResponseBuilder;
use trust_dns_server::client::op::{Header, MessageType, OpCode, ResponseCode};
use trust_dns_server::client::rr::rdata::TXT;
use trust_dns_server::client::rr::{LowerName, Name, RData, Record};
use trust_dns_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use trust_dns_server::ServerFuture;

fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

fn lower(s: &str) -> LowerName {
    LowerName::from(name(s))
}

/// Records by name. Names present with no records answer NOERROR with an empty answer
/// section, absent names answer NXDOMAIN.
#[derive(Clone, Default)]
pub struct Zone {
    records: HashMap<LowerName, Vec<RData>>,
    failing: HashSet<LowerName>,
    authoritative: bool,
}

impl Zone {
    pub fn new(authoritative: bool) -> Self {
        Zone {
            authoritative,
            ..Zone::default()
        }
    }

    /// A small copy of the apache.org zone.
    pub fn fixture() -> Self {
        let mut zone = Zone::new(true);
        zone.add("apache.org.", RData::A(Ipv4Addr::new(140, 211, 11, 130)))
            .add(
                "apache.org.",
                RData::AAAA(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0x130)),
            )
            .add("apache.org.", RData::NS(name("ns.hyperreal.org.")))
            .add("apache.org.", RData::NS(name("ns2.surfnet.nl.")))
            .add(
                "apache.org.",
                RData::SOA(SOA::new(
                    name("ns.hyperreal.org."),
                    name("root.hyperreal.org."),
                    2_008_031_601,
                    3600,
                    900,
                    604_800,
                    3600,
                )),
            )
            .add("apache.org.", RData::MX(MX::new(20, name("mail.apache.org."))))
            .add("apache.org.", RData::MX(MX::new(30, name("backup.apache.org."))))
            .add(
                "xml.apache.org.",
                RData::TXT(TXT::new(vec!["v=spf1 mx -all".to_string()])),
            )
            .add(
                "130.11.211.140.in-addr.arpa.",
                RData::PTR(name("eos.apache.org.")),
            )
            .add(
                "0.3.1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa.",
                RData::PTR(name("v6.apache.org.")),
            )
            .add_name("org.")
            .fail("broken.apache.org.");
        zone
    }

    pub fn add_name(&mut self, fqdn: &str) -> &mut Self {
        self.records.entry(lower(fqdn)).or_default();
        self
    }

    pub fn add(&mut self, fqdn: &str, rdata: RData) -> &mut Self {
        self.records.entry(lower(fqdn)).or_default().push(rdata);
        self
    }

    /// Answer SERVFAIL for every query of `fqdn`.
    pub fn fail(&mut self, fqdn: &str) -> &mut Self {
        self.failing.insert(lower(fqdn));
        self
    }

    /// Serve the zone on a loopback UDP port from a background thread.
    pub fn serve(self) -> SocketAddr {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
                tx.send(socket.local_addr().unwrap()).unwrap();
                let mut server = ServerFuture::new(Handler { zone: self });
                server.register_socket(socket);
                let _ = server.block_until_done().await;
            });
        });
        rx.recv().unwrap()
    }
}

/// Test settings against `server`: short timeouts, two rounds.
pub fn config(server: SocketAddr) -> Config {
    Config {
        server: Some(server.to_string()),
        only_authoritative: false,
        timeout: Duration::from_millis(500),
        retries: 2,
    }
}

struct Handler {
    zone: Zone,
}

impl Handler {
    async fn dispatch_request<R: ResponseHandler>(
        &self,
        request: &Request,
        response: R,
    ) -> io::Result<ResponseInfo> {
        if request.op_code() != OpCode::Query || request.message_type() != MessageType::Query {
            return self.send_code(request, response, ResponseCode::NotImp).await;
        }

        let query_name = request.query().name();
        if self.zone.failing.contains(query_name) {
            return self.send_code(request, response, ResponseCode::ServFail).await;
        }
        match self.zone.records.get(query_name) {
            None => self.send_code(request, response, ResponseCode::NXDomain).await,
            Some(rdata) => {
                let query_type = request.query().query_type();
                let answers: Vec<Record> = rdata
                    .iter()
                    .filter(|rd| rd.to_record_type() == query_type)
                    .map(|rd| Record::from_rdata(query_name.into(), 1, rd.clone()))
                    .collect();
                self.send_answers(request, response, &answers).await
            }
        }
    }

    async fn send_answers<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
        answers: &[Record],
    ) -> io::Result<ResponseInfo> {
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(self.zone.authoritative);
        let builder = MessageResponseBuilder::from_message_request(request);
        let response = builder.build(header, answers.iter(), &[], &[], &[]);
        response_handle.send_response(response).await
    }

    async fn send_code<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
        code: ResponseCode,
    ) -> io::Result<ResponseInfo> {
        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = Header::response_from_request(request.header());
        header.set_authoritative(self.zone.authoritative);
        header.set_response_code(code);
        let response = builder.build_no_records(header);
        response_handle.send_response(response).await
    }
}

#[async_trait::async_trait]
impl RequestHandler for Handler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        response_handle: R,
    ) -> ResponseInfo {
        match self.dispatch_request(request, response_handle).await {
            Ok(info) => info,
            Err(error) => {
                eprintln!("error in RequestHandler: {error:?}");
                let mut header = Header::new();
                header.set_response_code(ResponseCode::ServFail);
                header.into()
            }
        }
    }
}
