// Runs several nodes against each other through an in-memory driver and checks they converge.

use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dv_router::{DataPacket, Destination, DvRouter, Latency, Outbound, Outbox, PortId, RouterConfig};

const HOST_LATENCY: u32 = 0;
const MAX_MESSAGES: usize = 200_000;

/// In-memory driver: wires ports together and delivers advertisements FIFO.
struct Network {
    nodes: Vec<DvRouter<Outbox>>,
    wires: HashMap<(usize, PortId), (usize, PortId)>,
    next_port: Vec<u32>,
    host_port: Vec<PortId>,
    now: u64,
}

impl Network {
    fn new(count: usize, config: RouterConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut network = Network {
            nodes: Vec::new(),
            wires: HashMap::new(),
            next_port: vec![0; count],
            host_port: Vec::new(),
            now: 0,
        };
        for i in 0..count {
            let router = DvRouter::new(config.clone(), Outbox::new(0)).expect("valid config");
            network.nodes.push(router);
            let port = network.allocate_port(i);
            network.nodes[i].on_link_up(port, HOST_LATENCY);
            network.nodes[i].install_static(host(i), port).expect("host port up");
            network.host_port.push(port);
        }
        network.deliver();
        network
    }

    fn allocate_port(&mut self, node: usize) -> PortId {
        self.next_port[node] += 1;
        PortId(self.next_port[node])
    }

    fn connect(&mut self, a: usize, b: usize, latency: u32) -> (PortId, PortId) {
        let pa = self.allocate_port(a);
        let pb = self.allocate_port(b);
        self.wires.insert((a, pa), (b, pb));
        self.wires.insert((b, pb), (a, pa));
        self.nodes[a].on_link_up(pa, latency);
        self.nodes[b].on_link_up(pb, latency);
        self.deliver();
        (pa, pb)
    }

    fn disconnect(&mut self, a: usize, pa: PortId) {
        let (b, pb) = self.wires.remove(&(a, pa)).expect("wired port");
        self.wires.remove(&(b, pb));
        self.nodes[a].on_link_down(pa);
        self.nodes[b].on_link_down(pb);
        self.deliver();
    }

    fn set_time(&mut self, now: u64) {
        self.now = now;
        for node in &mut self.nodes {
            node.environment_mut().set_time(now);
        }
    }

    /// Drains every outbox until the network is quiet.
    fn deliver(&mut self) -> usize {
        let mut queue = VecDeque::new();
        let mut delivered = 0;
        loop {
            for i in 0..self.nodes.len() {
                for out in self.nodes[i].environment_mut().drain() {
                    if let Outbound::Advertisement { port, destination, latency } = out {
                        if let Some(&(peer, peer_port)) = self.wires.get(&(i, port)) {
                            queue.push_back((peer, destination, latency, peer_port));
                        }
                    }
                }
            }
            let (peer, destination, latency, port) = match queue.pop_front() {
                Some(message) => message,
                None => return delivered,
            };
            self.nodes[peer]
                .on_advertisement(destination, latency, port)
                .expect("wired ports are up");
            delivered += 1;
            assert!(delivered < MAX_MESSAGES, "network did not quiesce");
        }
    }

    fn periodic_round(&mut self) {
        let now = self.now;
        for node in &mut self.nodes {
            node.periodic_update(now);
        }
        self.deliver();
    }

    fn converge(&mut self) {
        for _ in 0..self.nodes.len() + 2 {
            self.periodic_round();
        }
    }

    fn latency(&self, from: usize, to: usize) -> Option<Latency> {
        self.nodes[from].table().get(&host(to)).map(|entry| entry.latency)
    }

    /// Follows data forwarding from `from` toward host `to`; returns the path cost if it arrives.
    fn send_data(&mut self, from: usize, to: usize) -> Option<u32> {
        let packet = DataPacket {
            source: host(from),
            destination: host(to),
            payload: b"hello".to_vec(),
        };
        let mut at = from;
        let mut in_port = self.host_port[from];
        let mut cost = 0u32;
        for _ in 0..=self.nodes.len() {
            self.nodes[at].on_data_packet(packet.clone(), in_port);
            let out = self.nodes[at].environment_mut().drain();
            let port = match out.as_slice() {
                [Outbound::Data { port, .. }] => *port,
                [] => return None,
                other => panic!("unexpected outbound traffic: {:?}", other),
            };
            if port == self.host_port[at] {
                return if at == to { Some(cost) } else { None };
            }
            cost += self.nodes[at].links().latency(port).expect("out port is up");
            let (next, next_port) = self.wires[&(at, port)];
            at = next;
            in_port = next_port;
        }
        None
    }
}

fn host(i: usize) -> Destination {
    Destination::new(format!("h{}", i))
}

fn shortest_paths(count: usize, edges: &[(usize, usize, u32)]) -> Vec<Vec<u64>> {
    let mut dist = vec![vec![u64::MAX; count]; count];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0;
    }
    for &(a, b, w) in edges {
        let w = u64::from(w);
        dist[a][b] = dist[a][b].min(w);
        dist[b][a] = dist[b][a].min(w);
    }
    for k in 0..count {
        for i in 0..count {
            for j in 0..count {
                if dist[i][k] != u64::MAX && dist[k][j] != u64::MAX {
                    let through = dist[i][k] + dist[k][j];
                    if through < dist[i][j] {
                        dist[i][j] = through;
                    }
                }
            }
        }
    }
    dist
}

fn random_topology(rng: &mut StdRng) -> (usize, Vec<(usize, usize, u32)>) {
    let count = rng.gen_range(3..=6);
    let mut edges = Vec::new();
    for i in 1..count {
        let j = rng.gen_range(0..i);
        edges.push((i, j, rng.gen_range(1..=3)));
    }
    for i in 0..count {
        for j in (i + 1)..count {
            if rng.gen_bool(0.3) && !edges.iter().any(|&(a, b, _)| (a, b) == (i, j) || (a, b) == (j, i)) {
                edges.push((i, j, rng.gen_range(1..=3)));
            }
        }
    }
    (count, edges)
}

fn policies() -> Vec<RouterConfig> {
    vec![
        RouterConfig::default(),
        RouterConfig {
            split_horizon: true,
            ..RouterConfig::default()
        },
        RouterConfig {
            poison_reverse: true,
            ..RouterConfig::default()
        },
        RouterConfig::full_mitigation(),
    ]
}

#[test]
fn random_topologies_converge_to_shortest_paths() {
    for config in policies() {
        for seed in 0..15u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (count, edges) = random_topology(&mut rng);
            let mut network = Network::new(count, config.clone());
            for &(a, b, w) in &edges {
                network.connect(a, b, w);
            }
            network.converge();

            let expected = shortest_paths(count, &edges);
            for from in 0..count {
                for to in 0..count {
                    let want = Latency::clamped(expected[from][to], config.infinity);
                    assert_eq!(
                        network.latency(from, to),
                        Some(want),
                        "seed {} policy {:?}: h{} seen from r{}",
                        seed,
                        config,
                        to,
                        from
                    );
                    if let Latency::Finite(cost) = want {
                        assert_eq!(network.send_data(from, to), Some(cost));
                    }
                }
            }
        }
    }
}

#[test]
fn line_failure_counts_to_infinity_without_mitigation() {
    let mut network = Network::new(3, RouterConfig::default());
    network.connect(0, 1, 1);
    let (p12, _) = network.connect(1, 2, 1);
    network.converge();
    assert_eq!(network.latency(0, 2), Some(Latency::Finite(2)));

    network.disconnect(1, p12);
    network.periodic_round();

    assert_eq!(network.latency(0, 2), Some(Latency::Unreachable));
    assert_eq!(network.latency(1, 2), Some(Latency::Unreachable));
    assert_eq!(network.send_data(0, 2), None);
}

#[test]
fn poison_reverse_stops_the_count_immediately() {
    let config = RouterConfig {
        poison_reverse: true,
        ..RouterConfig::default()
    };
    let mut network = Network::new(3, config);
    network.connect(0, 1, 1);
    let (p12, _) = network.connect(1, 2, 1);
    network.converge();

    network.disconnect(1, p12);
    assert_eq!(network.latency(1, 2), None);

    // Only poison flows back, so r1 never relearns a finite path through r0.
    let delivered_before = network.deliver();
    assert_eq!(delivered_before, 0);
    network.periodic_round();
    assert_eq!(network.latency(1, 2), Some(Latency::Unreachable));
    assert_eq!(network.latency(0, 2), Some(Latency::Unreachable));
}

#[test]
fn poison_on_link_down_reaches_the_far_side_without_a_timer() {
    let mut network = Network::new(3, RouterConfig::full_mitigation());
    network.connect(0, 1, 1);
    let (p12, _) = network.connect(1, 2, 1);
    network.converge();

    network.disconnect(1, p12);
    assert_eq!(network.latency(1, 2), Some(Latency::Unreachable));
    assert_eq!(network.latency(0, 2), Some(Latency::Unreachable));
    assert_eq!(network.latency(2, 0), Some(Latency::Unreachable));
}

#[test]
fn reroutes_around_a_failed_link() {
    let mut network = Network::new(4, RouterConfig::full_mitigation());
    // Square 0-1-2 cheap, 0-3-2 expensive.
    let (p01, _) = network.connect(0, 1, 1);
    network.connect(1, 2, 1);
    network.connect(0, 3, 3);
    network.connect(3, 2, 3);
    network.converge();
    assert_eq!(network.latency(0, 2), Some(Latency::Finite(2)));

    network.disconnect(0, p01);
    network.converge();
    assert_eq!(network.latency(0, 2), Some(Latency::Finite(6)));
    assert_eq!(network.send_data(0, 2), Some(6));
}

#[test]
fn silent_neighbors_routes_expire() {
    let mut network = Network::new(2, RouterConfig::default());
    network.connect(0, 1, 2);
    network.converge();
    assert_eq!(network.latency(0, 1), Some(Latency::Finite(2)));

    // r1 stops advertising; r0 keeps ticking.
    network.set_time(15);
    network.nodes[0].tick(15);
    assert_eq!(network.latency(0, 1), None);
    assert_eq!(network.latency(0, 0), Some(Latency::Finite(HOST_LATENCY)));
}
