use serde_json::{json, Map, Value};

use super::*;
use crate::utils::SerializationFormat::{Json, Yaml};
use crate::utils::{ErrorContext, SerdeFile};

/// Helper function: Grab the full path of resource-file `fname`
fn resource(rname: &str) -> String {
    format!("{}/resources/{}", env!("CARGO_MANIFEST_DIR"), rname)
}
/// Helper function: Keys of JSON object `val`, in order
fn keys(val: &Value) -> Vec<&str> {
    match val.as_object() {
        Some(obj) => obj.keys().map(|k| k.as_str()).collect(),
        None => Vec::new(),
    }
}
/// Helper function: group of type `kind`, named `name`, with `statements`
fn group(kind: &str, name: &str, statements: Vec<LibStatement>) -> LibGroup {
    LibGroup {
        kind: kind.into(),
        args: vec![LibExpr::generic(name)],
        statements,
    }
}
/// Helper function: two or three-value `define`
fn define(vals: &[&str]) -> LibStatement {
    LibDefine::new(vals.iter().map(|v| LibExpr::string(*v)).collect()).into()
}

#[test]
fn it_projects_end_to_end() -> LibertyResult<()> {
    let src = "library(mylib){ cell(AND2){ pin(A){ direction : input ; } } define(my_define, pin, string) ; }";
    let libs = parse_str(src)?;
    assert_eq!(libs.len(), 1);
    let json = libs[0].to_json()?;
    let golden = json!({
        "names": ["mylib"],
        "defines": {
            "my_define": {"allowed_group_name": "pin", "valtype": "string"}
        },
        "groups": [
            {"cell": {
                "names": ["AND2"],
                "groups": [{"pin": {"names": ["A"], "direction": "input"}}]
            }}
        ]
    });
    assert_eq!(json, golden);
    assert_eq!(keys(&json), vec!["names", "defines", "groups"]);
    Ok(())
}
#[test]
fn it_projects_demo_library() -> LibertyResult<()> {
    let libs = parse_file(resource("demo.lib"))?;
    let json = to_json(&libs[0], &ProjectOptions::default())?;
    let golden: Value = Json.open(resource("demo.json"))?;
    assert_eq!(json, golden);
    assert_eq!(
        keys(&json),
        vec![
            "names",
            "delay_model",
            "time_unit",
            "nom_voltage",
            "revision",
            "in_place_swap_mode",
            "capacitive_load_unit",
            "defines",
            "groups"
        ]
    );
    assert_eq!(keys(&json["defines"]), vec!["drive_class", "thermal"]);
    // Typed numerics, not strings
    assert!(json["nom_voltage"].is_f64());
    assert!(json["revision"].is_i64());
    Ok(())
}
#[test]
fn it_converts_files() -> LibertyResult<()> {
    let docs = convert_file(resource("demo.lib"), &ProjectOptions::default())?;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["names"], json!(["demo"]));
    Ok(())
}
#[test]
fn it_converts_strings() -> LibertyResult<()> {
    let opts = ProjectOptions::default();
    let docs = convert_str("library (a) { x : 1 ; } library (b) { }", &opts)?;
    assert_eq!(docs, vec![json!({"names": ["a"], "x": 1}), json!({"names": ["b"]})]);
    // Read errors surface before any projection
    assert!(convert_str("library (a) { x : 1 ; ", &opts).is_err());
    Ok(())
}
#[test]
fn it_coerces_booleans_before_kinds() -> LibertyResult<()> {
    let lib = group(
        "library",
        "l",
        vec![
            LibAttr::new("a", LibExpr::generic("true")).into(),
            LibAttr::new("b", LibExpr::generic("false")).into(),
            LibAttr::new(
                "c",
                LibExpr {
                    image: Some("true".into()),
                    value: LibExprValue::Str("true".into()),
                },
            )
            .into(),
            LibAttr::new("d", LibExpr::string("truthy")).into(),
        ],
    );
    let json = lib.to_json()?;
    assert_eq!(json["a"], json!(1));
    assert_eq!(json["b"], json!(0));
    assert_eq!(json["c"], json!(1));
    assert_eq!(json["d"], json!("truthy"));
    Ok(())
}
#[test]
fn it_projects_typed_numerics() -> LibertyResult<()> {
    let libs = parse_str("library (l) { a : 5 ; b : 0.25 ; c : -1e3 ; d : 5ns ; }")?;
    let json = libs[0].to_json()?;
    assert_eq!(json["a"], json!(5));
    assert_eq!(json["b"], json!(0.25));
    assert_eq!(json["c"], json!(-1000.0));
    assert_eq!(json["d"], json!("5ns"));
    Ok(())
}
#[test]
fn it_is_idempotent() -> LibertyResult<()> {
    let lib = group(
        "library",
        "l",
        vec![
            define(&["zeta", "cell"]),
            define(&["alpha", "pin", "integer"]),
            define(&["zeta", "pin"]),
            define(&["mid", "bus"]),
        ],
    );
    let first = serde_json::to_string(&lib.to_json()?)?;
    let second = serde_json::to_string(&lib.to_json()?)?;
    assert_eq!(first, second);
    // Defines stay in first-seen order
    assert_eq!(
        first,
        r#"{"names":["l"],"defines":{"zeta":{"allowed_group_name":"cell|pin","valtype":"undefined_valuetype"},"alpha":{"allowed_group_name":"pin","valtype":"int32"},"mid":{"allowed_group_name":"bus","valtype":"undefined_valuetype"}}}"#
    );
    Ok(())
}
#[test]
fn it_merges_defines() -> LibertyResult<()> {
    let lib = group(
        "library",
        "l",
        vec![
            define(&["A", "cell"]),
            define(&["A", "pin"]),
            define(&["B", "bus", "integer"]),
        ],
    );
    let json = lib.to_json()?;
    assert_eq!(
        json["defines"],
        json!({
            "A": {"allowed_group_name": "cell|pin", "valtype": "undefined_valuetype"},
            "B": {"allowed_group_name": "bus", "valtype": "int32"}
        })
    );
    Ok(())
}
#[test]
fn it_merges_repeated_defines_verbatim() -> LibertyResult<()> {
    let src = r#"
    library (l) {
        define (A, cell) ;
        define (A, cell) ;
        define (cap, pin) ;
        define (cap, bus, integer) ;
    }
    "#;
    let json = parse_str(src)?[0].to_json()?;
    assert_eq!(
        json["defines"],
        json!({
            "A": {"allowed_group_name": "cell|cell", "valtype": "undefined_valuetype"},
            "cap": {"allowed_group_name": "pin|bus", "valtype": "undefined_valuetype"}
        })
    );
    Ok(())
}
#[test]
fn it_classifies_define_groups() -> LibertyResult<()> {
    let libs = parse_str(r#"library (l) { define_group ("C", "latch", "float") ; }"#)?;
    let json = libs[0].to_json()?;
    assert_eq!(
        json["defines"],
        json!({"C": {"allowed_group_name": "latch", "valtype": "float64"}})
    );
    assert!(json.get("define_group").is_none());
    Ok(())
}
#[test]
fn it_keeps_complex_attributes_as_attributes() -> LibertyResult<()> {
    // Two and three-valued, but not defines
    let libs = parse_str("library (l) { capacitive_load_unit (1, pf) ; voltage_map (VDD, 1.8, x) ; }")?;
    let json = libs[0].to_json()?;
    assert_eq!(json["capacitive_load_unit"], json!([1, "pf"]));
    assert_eq!(json["voltage_map"], json!(["VDD", 1.8, "x"]));
    assert!(json.get("defines").is_none());
    Ok(())
}
#[test]
fn it_passes_through_malformed_defines() -> LibertyResult<()> {
    let libs = parse_str("library (l) { define (lonely) ; define (a, b, c, d) ; }")?;
    let json = libs[0].to_json()?;
    // Both share the `define` key; the last one wins
    assert_eq!(json["defines"], json!({"define": ["a", "b", "c", "d"]}));
    Ok(())
}
#[test]
fn it_flattens_the_root() -> LibertyResult<()> {
    let lib = group(
        "library",
        "l",
        vec![
            LibAttr::new("voltage", LibExpr::int(5)).into(),
            group("cell", "c", vec![LibGroup::new("pin").into()]).into(),
        ],
    );
    let json = lib.to_json()?;
    assert!(json.get("library").is_none());
    assert_eq!(json["voltage"], json!(5));
    assert_eq!(
        json["groups"],
        json!([{"cell": {"names": ["c"], "groups": [{"pin": {}}]}}])
    );
    Ok(())
}
#[test]
fn it_wraps_the_root_on_request() -> LibertyResult<()> {
    let lib = group("library", "l", vec![LibAttr::new("voltage", LibExpr::int(5)).into()]);
    let opts = ProjectOptions {
        wrap_root: true,
        ..Default::default()
    };
    let json = lib.to_json_with(&opts)?;
    assert_eq!(json, json!({"library": {"names": ["l"], "voltage": 5}}));
    Ok(())
}
#[test]
fn it_projects_empty_groups() -> LibertyResult<()> {
    let json = project_group(&LibGroup::new("timing"), &ProjectOptions::default())?;
    assert_eq!(json, json!({"timing": {}}));
    // And an empty root is an empty document
    assert_eq!(LibGroup::new("library").to_json()?, json!({}));
    Ok(())
}
#[test]
fn it_projects_absent_values() -> LibertyResult<()> {
    let mut lib = group("library", "l", vec![LibAttr::new("empty", None::<LibExpr>).into()]);
    lib.args.push(LibExpr {
        image: None,
        value: LibExprValue::Generic,
    });
    lib.statements
        .push(LibComplexAttr::new("nothing", Vec::new()).into());
    let json = lib.to_json()?;
    assert_eq!(json, json!({"names": ["l"], "nothing": []}));
    Ok(())
}
#[test]
fn it_falls_back_on_unknown_kinds() -> LibertyResult<()> {
    let lib = group(
        "library",
        "l",
        vec![LibAttr::new("bus", LibExpr::unknown("bus_range", "A[0:3]")).into()],
    );
    assert_eq!(lib.to_json()?["bus"], json!("A[0:3]"));
    Ok(())
}
#[test]
fn it_resolves_attribute_collisions() -> LibertyResult<()> {
    let libs = parse_str(
        r#"
        library (l) {
            area : 1 ;
            area : 2 ;
            groups : 3 ;
            cell (c) { }
        }
        "#,
    )?;
    let json = libs[0].to_json()?;
    // Repeats are last-wins; structural fields win over attributes
    assert_eq!(json["area"], json!(2));
    assert_eq!(json["groups"], json!([{"cell": {"names": ["c"]}}]));
    // Without a structural field to collide with, the attribute stays
    let libs = parse_str("library () { names : 3 ; }")?;
    assert_eq!(libs[0].to_json()?, json!({"names": 3}));
    Ok(())
}
#[test]
fn it_reports_structural_errors() -> LibertyResult<()> {
    let lib = group(
        "library",
        "l",
        vec![group("cell", "AND2", vec![LibGroup::new("").into()]).into()],
    );
    let err = lib.to_json().unwrap_err();
    match err {
        LibertyError::Projection { ref stack, .. } => {
            assert_eq!(
                stack[..2],
                [
                    ErrorContext::Group {
                        kind: "library".into(),
                        name: Some("l".into())
                    },
                    ErrorContext::Group {
                        kind: "cell".into(),
                        name: Some("AND2".into())
                    },
                ]
            );
        }
        _ => panic!("Expected a projection error"),
    }
    assert!(err.to_string().contains("library(l) > cell(AND2)"));

    // Empty attribute and define names
    let lib = group("library", "l", vec![LibAttr::new("", LibExpr::int(1)).into()]);
    assert!(lib.to_json().is_err());
    let lib = group("library", "l", vec![LibComplexAttr::new("", vec![]).into()]);
    assert!(lib.to_json().is_err());
    Ok(())
}
#[test]
fn it_does_not_mutate_on_failure() -> LibertyResult<()> {
    let mut root = Map::new();
    root.insert("preexisting".into(), json!(true));
    let bad = group(
        "library",
        "l",
        vec![
            LibAttr::new("voltage", LibExpr::int(5)).into(),
            LibGroup::new("").into(),
        ],
    );
    assert!(project_into(&bad, &mut root, &ProjectOptions::default()).is_err());
    assert_eq!(Value::Object(root.clone()), json!({"preexisting": true}));

    // And on success, library fields overwrite same-named fields
    root.insert("voltage".into(), json!(1));
    let good = group("library", "l", vec![LibAttr::new("voltage", LibExpr::int(5)).into()]);
    project_into(&good, &mut root, &ProjectOptions::default())?;
    assert_eq!(
        Value::Object(root),
        json!({"preexisting": true, "voltage": 5, "names": ["l"]})
    );
    Ok(())
}
#[test]
fn it_limits_depth() -> LibertyResult<()> {
    // Five levels deep
    let mut lib = LibGroup::new("g");
    for _ in 0..4 {
        let mut parent = LibGroup::new("g");
        parent.statements.push(lib.into());
        lib = parent;
    }
    let opts = |max_depth| ProjectOptions {
        max_depth,
        ..Default::default()
    };
    assert!(lib.to_json_with(&opts(5)).is_ok());
    assert!(lib.to_json_with(&opts(4)).is_err());
    Ok(())
}
#[test]
fn it_projects_concurrently() -> LibertyResult<()> {
    let libs = parse_file(resource("demo.lib"))?;
    let lib = &libs[0];
    let expected = lib.to_json()?;
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| lib.to_json())).collect();
        for h in handles {
            let json = h.join().expect("projection thread panicked");
            assert_eq!(json.ok().as_ref(), Some(&expected));
        }
    });
    Ok(())
}
#[test]
fn it_round_trips_files() -> LibertyResult<()> {
    let libs = parse_file(resource("demo.lib"))?;
    let dir = tempfile::tempdir()?;
    for fmt in [Json, Yaml] {
        let path = dir.path().join("demo.lib.out");
        libs[0].save(fmt, &path)?;
        let back = LibGroup::open(&path, fmt)?;
        assert_eq!(back, libs[0]);
        assert_eq!(back.to_json()?, libs[0].to_json()?);
    }
    Ok(())
}
#[test]
fn it_loads_options() -> LibertyResult<()> {
    let opts: ProjectOptions = Yaml.from_str(
        r#"
        max_depth: 12
        wrap_root: true
        "#,
    )?;
    assert_eq!(opts.max_depth, 12);
    assert!(opts.wrap_root);
    assert_eq!(opts.root_kind, "library");
    Ok(())
}
#[test]
fn it_writes_schema() -> LibertyResult<()> {
    use schemars::schema_for;
    let schema = schema_for!(LibGroup);
    let json = serde_json::to_value(&schema)?;
    assert_eq!(json["title"], json!("LibGroup"));
    assert!(json["definitions"].get("LibStatement").is_some());
    assert!(json["definitions"].get("LibExpr").is_some());
    Ok(())
}
