use busroute_core::prelude::*;
use geo::Point;

const EPS: f64 = 1e-6;

/// Three stops served by a single roundtrip bus
fn biryulyovo() -> TransitNetwork {
    let mut network = TransitNetwork::new();
    network.add_stop("Biryulyovo Zapadnoye", Point::new(37.6517, 55.574371));
    network.add_stop("Biryulyovo Tovarnaya", Point::new(37.653656, 55.592028));
    network.add_stop("Universam", Point::new(37.645687, 55.587655));
    network
        .set_distance("Biryulyovo Zapadnoye", "Biryulyovo Tovarnaya", 2600)
        .unwrap();
    network
        .set_distance("Biryulyovo Tovarnaya", "Universam", 890)
        .unwrap();
    network
        .set_distance("Universam", "Biryulyovo Zapadnoye", 2500)
        .unwrap();
    network
        .add_bus(
            "297",
            &[
                "Biryulyovo Zapadnoye",
                "Biryulyovo Tovarnaya",
                "Universam",
                "Biryulyovo Zapadnoye",
            ],
            true,
        )
        .unwrap();
    network
}

/// Two lines meeting at "Hub", plus an express that skips it
fn two_lines() -> TransitNetwork {
    let mut network = TransitNetwork::new();
    for name in ["West", "Market", "Hub", "Park", "East", "Island"] {
        network.add_stop(name, Point::new(0.0, 0.0));
    }
    network.set_distance("West", "Market", 1000).unwrap();
    network.set_distance("Market", "Hub", 1000).unwrap();
    network.set_distance("Hub", "Park", 1500).unwrap();
    network.set_distance("Park", "East", 1500).unwrap();
    network.set_distance("West", "East", 20000).unwrap();

    network.add_bus("1", &["West", "Market", "Hub"], false).unwrap();
    network.add_bus("2", &["Hub", "Park", "East"], false).unwrap();
    network.add_bus("X", &["West", "East"], false).unwrap();
    network
}

fn router(network: &TransitNetwork, wait: f64, velocity: f64) -> TransportRouter {
    TransportRouter::new(network, RoutingSettings::new(wait, velocity)).unwrap()
}

fn assert_well_formed(result: &RoutingResult) {
    let sum: f64 = result.items.iter().map(RouteItem::time).sum();
    assert!(
        (sum - result.total_time).abs() < EPS,
        "items sum to {sum}, total is {}",
        result.total_time
    );

    for (idx, item) in result.items.iter().enumerate() {
        match item {
            RouteItem::Wait { .. } => assert_eq!(idx % 2, 0, "wait at odd position: {result:?}"),
            RouteItem::Ride { span_count, .. } => {
                assert_eq!(idx % 2, 1, "ride at even position: {result:?}");
                assert!(*span_count >= 1);
            }
        }
    }
    if !result.items.is_empty() {
        assert!(matches!(result.items.last(), Some(RouteItem::Ride { .. })));
    }
}

#[test]
fn biryulyovo_scenario() {
    let router = router(&biryulyovo(), 6.0, 40.0);
    let result = router
        .build_route("Biryulyovo Zapadnoye", "Universam")
        .unwrap();

    assert!((result.total_time - 11.235).abs() < EPS);
    assert_eq!(result.items.len(), 2);
    assert_eq!(
        result.items[0],
        RouteItem::Wait {
            stop_name: "Biryulyovo Zapadnoye".to_string(),
            time: 6.0
        }
    );
    let RouteItem::Ride {
        bus_name,
        span_count,
        time,
    } = &result.items[1]
    else {
        panic!("expected a ride, got {:?}", result.items[1]);
    };
    assert_eq!(bus_name, "297");
    assert_eq!(*span_count, 2);
    assert!((time - 5.235).abs() < EPS);
    assert_well_formed(&result);
}

#[test]
fn route_to_same_stop_is_empty() {
    let router = router(&biryulyovo(), 6.0, 40.0);
    for stop in ["Biryulyovo Zapadnoye", "Biryulyovo Tovarnaya", "Universam"] {
        assert_eq!(
            router.build_route(stop, stop),
            Some(RoutingResult::empty())
        );
    }
}

#[test]
fn stop_without_buses_routes_to_itself() {
    let mut network = biryulyovo();
    network.add_stop("Lonely", Point::new(37.0, 55.0));
    let router = router(&network, 6.0, 40.0);

    assert_eq!(
        router.build_route("Lonely", "Lonely"),
        Some(RoutingResult::empty())
    );
    assert_eq!(router.build_route("Lonely", "Universam"), None);
}

#[test]
fn unknown_stop_has_no_route() {
    let router = router(&biryulyovo(), 6.0, 40.0);
    assert_eq!(router.build_route("Nowhere", "Universam"), None);
    assert_eq!(router.build_route("Universam", "Nowhere"), None);
    assert_eq!(router.build_route("Nowhere", "Nowhere"), None);
}

#[test]
fn disconnected_networks_have_no_route() {
    let mut network = biryulyovo();
    network.add_stop("Tolstopaltsevo", Point::new(37.20829, 55.611087));
    network.add_stop("Marushkino", Point::new(37.209755, 55.595884));
    network
        .set_distance("Tolstopaltsevo", "Marushkino", 3900)
        .unwrap();
    network
        .add_bus("750", &["Tolstopaltsevo", "Marushkino"], false)
        .unwrap();
    let router = router(&network, 6.0, 40.0);

    assert_eq!(router.build_route("Universam", "Marushkino"), None);
    assert_eq!(router.build_route("Marushkino", "Universam"), None);
    assert!(router.build_route("Marushkino", "Tolstopaltsevo").is_some());
}

#[test]
fn transfer_between_lines() {
    // 60 km/h: one minute per kilometre
    let router = router(&two_lines(), 2.0, 60.0);
    let result = router.build_route("West", "East").unwrap();

    assert!((result.total_time - (2.0 + 2.0 + 2.0 + 3.0)).abs() < EPS);
    assert_eq!(
        result.items,
        vec![
            RouteItem::Wait {
                stop_name: "West".to_string(),
                time: 2.0
            },
            RouteItem::Ride {
                bus_name: "1".to_string(),
                span_count: 2,
                time: 2.0
            },
            RouteItem::Wait {
                stop_name: "Hub".to_string(),
                time: 2.0
            },
            RouteItem::Ride {
                bus_name: "2".to_string(),
                span_count: 2,
                time: 3.0
            },
        ]
    );
}

#[test]
fn long_wait_prefers_direct_bus() {
    // a transfer now costs more than the detour of the express
    let router = router(&two_lines(), 20.0, 60.0);
    let result = router.build_route("West", "East").unwrap();

    assert!((result.total_time - 40.0).abs() < EPS);
    assert_eq!(result.items.len(), 2);
    assert!(matches!(
        &result.items[1],
        RouteItem::Ride { bus_name, span_count: 1, .. } if bus_name == "X"
    ));
}

#[test]
fn alighting_mid_trip() {
    let router = router(&two_lines(), 2.0, 60.0);
    let result = router.build_route("West", "Market").unwrap();
    assert!((result.total_time - 3.0).abs() < EPS);
    assert!(matches!(
        &result.items[1],
        RouteItem::Ride { span_count: 1, .. }
    ));
}

#[test]
fn return_leg_of_non_roundtrip_bus() {
    let router = router(&two_lines(), 2.0, 60.0);
    let result = router.build_route("Hub", "West").unwrap();
    assert!((result.total_time - 4.0).abs() < EPS);
    assert_well_formed(&result);
}

#[test]
fn zero_wait_time() {
    let router = router(&two_lines(), 0.0, 60.0);
    let result = router.build_route("West", "East").unwrap();
    assert!((result.total_time - 5.0).abs() < EPS);
    assert_well_formed(&result);
}

#[test]
fn construction_fails_without_distance() {
    let mut network = two_lines();
    network.add_stop("Far", Point::new(0.0, 0.0));
    network.add_bus("9", &["East", "Far"], true).unwrap();

    let err = TransportRouter::new(&network, RoutingSettings::default()).unwrap_err();
    assert!(matches!(err, Error::MissingDistance { .. }));
}

#[test]
fn construction_fails_with_invalid_settings() {
    let err = TransportRouter::new(&two_lines(), RoutingSettings::new(-1.0, 40.0)).unwrap_err();
    assert!(matches!(err, Error::InvalidSettings(_)));
}

#[test]
fn serialized_router_answers_identically() {
    let network = two_lines();
    let original = router(&network, 3.5, 37.0);
    let restored = TransportRouter::from_bytes(&original.to_bytes().unwrap()).unwrap();

    let stops: Vec<_> = network.stops().iter().map(|s| s.name.as_str()).collect();
    for from in &stops {
        for to in &stops {
            assert_eq!(
                original.build_route(from, to),
                restored.build_route(from, to),
                "{from} -> {to}"
            );
        }
    }
}

#[test]
fn corrupted_bytes_are_rejected() {
    assert!(matches!(
        TransportRouter::from_bytes(b"not a router"),
        Err(Error::Json(_))
    ));
}

/// Serialized form of a small router, edited by `tamper`, then restored
fn restore_tampered(tamper: impl FnOnce(&mut serde_json::Value)) -> Result<TransportRouter, Error> {
    let mut network = TransitNetwork::new();
    for name in ["A", "B", "C"] {
        network.add_stop(name, Point::new(0.0, 0.0));
    }
    network.set_distance("A", "B", 1000).unwrap();
    network.set_distance("B", "C", 1000).unwrap();
    network.add_bus("1", &["A", "B", "C"], false).unwrap();
    let original = router(&network, 2.0, 30.0);

    let mut value: serde_json::Value = serde_json::from_slice(&original.to_bytes().unwrap()).unwrap();
    tamper(&mut value);
    TransportRouter::from_bytes(&serde_json::to_vec(&value).unwrap())
}

#[test]
fn untouched_bytes_restore() {
    let restored = restore_tampered(|_| {}).unwrap();
    assert!(restored.build_route("A", "C").is_some());
}

#[test]
fn truncated_index_row_is_rejected() {
    let result = restore_tampered(|value| {
        value["index"]["table"][0].as_array_mut().unwrap().truncate(1);
    });
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn predecessor_outside_graph_is_rejected() {
    let result = restore_tampered(|value| {
        let row = value["index"]["table"][0].as_array_mut().unwrap();
        let entry = row
            .iter_mut()
            .find(|entry| !entry["predecessor"].is_null())
            .unwrap();
        entry["predecessor"]["edge"] = serde_json::json!(10_000);
    });
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn source_with_last_edge_is_rejected() {
    let result = restore_tampered(|value| {
        let row = value["index"]["table"][0].as_array_mut().unwrap();
        let predecessor = row
            .iter()
            .find(|entry| !entry["predecessor"].is_null())
            .map(|entry| entry["predecessor"].clone())
            .unwrap();
        row[0]["predecessor"] = predecessor;
    });
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn vertex_of_unknown_stop_is_rejected() {
    let result = restore_tampered(|value| {
        value["stop_names"].as_array_mut().unwrap().pop();
    });
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn edge_of_unknown_bus_is_rejected() {
    let result = restore_tampered(|value| {
        value["bus_names"].as_array_mut().unwrap().clear();
    });
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn router_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransportRouter>();

    let router = router(&two_lines(), 2.0, 60.0);
    let expected = router.build_route("West", "East");
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    assert_eq!(router.build_route("West", "East"), expected);
                }
            });
        }
    });
}

mod proptests {
    use proptest::prelude::*;

    use super::*;

    const STOPS: usize = 7;

    /// Random network where every pair of stops has a road distance
    fn network_strategy() -> impl Strategy<Value = TransitNetwork> {
        (
            prop::collection::vec(100u32..5000, STOPS * STOPS),
            prop::collection::vec(
                (prop::collection::vec(0..STOPS, 2..7), any::<bool>()),
                1..5,
            ),
        )
            .prop_map(|(distances, buses)| {
                let mut network = TransitNetwork::new();
                let names: Vec<String> = (0..STOPS).map(|i| format!("Stop {i}")).collect();
                for name in &names {
                    network.add_stop(name, Point::new(0.0, 0.0));
                }
                for (i, from) in names.iter().enumerate() {
                    for (j, to) in names.iter().enumerate() {
                        if i != j {
                            network
                                .set_distance(from, to, distances[i * STOPS + j])
                                .unwrap();
                        }
                    }
                }
                for (bus, (mut stops, is_roundtrip)) in buses.into_iter().enumerate() {
                    stops.dedup();
                    if stops.len() < 2 {
                        continue;
                    }
                    let stop_names: Vec<&str> =
                        stops.iter().map(|&s| names[s].as_str()).collect();
                    network
                        .add_bus(&format!("B{bus}"), &stop_names, is_roundtrip)
                        .unwrap();
                }
                network
            })
    }

    fn all_pairs(network: &TransitNetwork) -> Vec<(String, String)> {
        let names: Vec<String> = network.stops().iter().map(|s| s.name.clone()).collect();
        names
            .iter()
            .flat_map(|from| names.iter().map(move |to| (from.clone(), to.clone())))
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn results_are_well_formed(
            network in network_strategy(),
            wait in 0.0f64..20.0,
            velocity in 10.0f64..80.0,
        ) {
            let router = router(&network, wait, velocity);
            for (from, to) in all_pairs(&network) {
                if let Some(result) = router.build_route(&from, &to) {
                    assert_well_formed(&result);
                    prop_assert_eq!(result.items.is_empty(), from == to);
                    if let Some(RouteItem::Wait { stop_name, .. }) = result.items.first() {
                        prop_assert_eq!(stop_name, &from);
                    }
                } else {
                    prop_assert_ne!(from, to);
                }
            }
        }

        #[test]
        fn longer_wait_never_shortens_a_route(
            network in network_strategy(),
            wait in 0.0f64..10.0,
            extra in 0.0f64..10.0,
        ) {
            let fast = router(&network, wait, 40.0);
            let slow = router(&network, wait + extra, 40.0);
            for (from, to) in all_pairs(&network) {
                let before = fast.build_route(&from, &to);
                let after = slow.build_route(&from, &to);
                prop_assert_eq!(before.is_some(), after.is_some());
                if let (Some(before), Some(after)) = (before, after) {
                    prop_assert!(after.total_time >= before.total_time - EPS);
                }
            }
        }

        #[test]
        fn serialization_preserves_answers(network in network_strategy()) {
            let original = router(&network, 6.0, 40.0);
            let restored = TransportRouter::from_bytes(&original.to_bytes().unwrap()).unwrap();
            for (from, to) in all_pairs(&network) {
                prop_assert_eq!(original.build_route(&from, &to), restored.build_route(&from, &to));
            }
        }

        #[test]
        fn equal_weight_ties_resolve_the_same_way(
            buses in prop::collection::vec(
                (prop::collection::vec(0..STOPS, 2..7), any::<bool>()),
                1..5,
            ),
        ) {
            // Uniform distances make many routes equally fast
            let mut network = TransitNetwork::new();
            let names: Vec<String> = (0..STOPS).map(|i| format!("Stop {i}")).collect();
            for name in &names {
                network.add_stop(name, Point::new(0.0, 0.0));
            }
            for from in &names {
                for to in &names {
                    if from != to {
                        network.set_distance(from, to, 1000).unwrap();
                    }
                }
            }
            for (bus, (mut stops, is_roundtrip)) in buses.into_iter().enumerate() {
                stops.dedup();
                if stops.len() < 2 {
                    continue;
                }
                let stop_names: Vec<&str> = stops.iter().map(|&s| names[s].as_str()).collect();
                network.add_bus(&format!("B{bus}"), &stop_names, is_roundtrip).unwrap();
            }

            let first = router(&network, 6.0, 40.0);
            let second = router(&network, 6.0, 40.0);
            for (from, to) in all_pairs(&network) {
                let answer = first.build_route(&from, &to);
                prop_assert_eq!(&answer, &first.build_route(&from, &to));
                prop_assert_eq!(&answer, &second.build_route(&from, &to));
            }
        }
    }
}
