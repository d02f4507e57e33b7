use yacon_codecs::{
    F64Converter, JsonValueConverter, NullableConverter, SequenceConverter, SerdeConverter,
    default_formatter, load_options,
};
use yacon_core::{
    Error, Result, TypedConverter, YamlFormatter, YamlFormatterOptions, YamlWriter,
    yaml_rust::Yaml,
};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

fn formatter() -> YamlFormatter {
    default_formatter(YamlFormatterOptions::default())
}

#[test]
fn scalars_round_trip() -> Result<()> {
    let formatter = formatter();

    for value in [true, false] {
        assert_eq!(formatter.deserialize::<bool>(&formatter.serialize(&value)?)?, value);
    }
    for value in [0i64, -5, i64::MAX, i64::MIN] {
        assert_eq!(formatter.deserialize::<i64>(&formatter.serialize(&value)?)?, value);
    }
    for value in [0u64, 7, u64::MAX] {
        assert_eq!(formatter.deserialize::<u64>(&formatter.serialize(&value)?)?, value);
    }
    for value in [1.5f64, 2.0, -0.25, 1e300] {
        assert_eq!(formatter.deserialize::<f64>(&formatter.serialize(&value)?)?, value);
    }
    for value in ["hello", "42", "true", "", "~", "two\nlines", "key: value", "0o17", "+.inf", "+7"] {
        let value = value.to_owned();
        assert_eq!(formatter.deserialize::<String>(&formatter.serialize(&value)?)?, value);
    }
    Ok(())
}

#[test]
fn scalar_edge_cases() -> Result<()> {
    let formatter = formatter();

    assert_eq!(formatter.serialize(&2.0f64)?, "2.0\n");
    assert!(formatter.deserialize::<f64>(&formatter.serialize(&f64::NAN)?)?.is_nan());
    assert_eq!(formatter.deserialize::<f64>("-.inf")?, f64::NEG_INFINITY);
    assert_eq!(formatter.deserialize::<f64>("3")?, 3.0);
    assert_eq!(formatter.deserialize::<i32>("-12")?, -12);

    assert!(matches!(formatter.deserialize::<i32>("3000000000"), Err(Error::Format { .. })));
    assert!(matches!(formatter.deserialize::<u64>("-1"), Err(Error::Format { .. })));
    assert!(matches!(formatter.deserialize::<u64>("'7'"), Err(Error::Format { .. })));
    assert!(matches!(formatter.deserialize::<bool>("yes please"), Err(Error::Format { .. })));
    assert!(matches!(formatter.deserialize::<i64>("[1]"), Err(Error::Format { .. })));
    Ok(())
}

#[test]
fn float_precision_comes_from_the_formatter() -> Result<()> {
    let formatter = default_formatter(YamlFormatterOptions {
        float_precision: Some(2),
        ..Default::default()
    });

    assert_eq!(formatter.serialize(&3.14159f64)?, "3.14\n");
    assert_eq!(formatter.deserialize::<f64>("3.14")?, 3.14);

    let mut writer = YamlWriter::new();
    F64Converter::with_precision(2).write_yaml(&mut writer, &(1.0 / 3.0))?;
    assert_eq!(writer.finish()?, Yaml::Real("0.33".into()));
    Ok(())
}

#[test]
fn float_precision_follows_option_changes() -> Result<()> {
    let mut formatter = default_formatter(YamlFormatterOptions {
        float_precision: Some(1),
        ..Default::default()
    });
    assert_eq!(formatter.serialize(&3.14159f64)?, "3.1\n");

    formatter.set_options(YamlFormatterOptions::default());
    assert_eq!(formatter.serialize(&3.14159f64)?, "3.14159\n");

    let mut formatter = YamlFormatter::default()
        .with_converter(F64Converter::with_precision(2).into_converter());
    assert_eq!(formatter.serialize(&3.14159f64)?, "3.14\n");

    formatter.set_options(YamlFormatterOptions {
        float_precision: Some(3),
        ..Default::default()
    });
    assert_eq!(formatter.serialize(&3.14159f64)?, "3.142\n");

    formatter.set_options(YamlFormatterOptions::default());
    assert_eq!(formatter.serialize(&3.14159f64)?, "3.14\n");
    Ok(())
}

#[test]
fn nullable_values() -> Result<()> {
    let formatter = formatter();

    assert_eq!(formatter.serialize(&None::<i64>)?, "~\n");
    assert_eq!(formatter.deserialize::<Option<i64>>("~")?, None);
    assert_eq!(formatter.deserialize::<Option<i64>>("null")?, None);
    assert_eq!(formatter.deserialize::<Option<i64>>("12")?, Some(12));
    assert_eq!(formatter.deserialize::<Option<String>>("'~'")?, Some("~".into()));
    assert_eq!(
        formatter.deserialize::<Option<bool>>(&formatter.serialize(&Some(true))?)?,
        Some(true)
    );
    Ok(())
}

#[test]
fn sequences_dispatch_their_elements() -> Result<()> {
    let formatter = formatter()
        .with_converter(SequenceConverter::<Vec<i64>>::new().into_converter())
        .with_converter(SequenceConverter::<Option<i64>>::new().into_converter());

    let empty: Vec<i64> = vec![];
    assert_eq!(formatter.deserialize::<Vec<i64>>(&formatter.serialize(&empty)?)?, empty);

    let words = vec!["a".to_owned(), "b c".to_owned(), "null".to_owned()];
    assert_eq!(formatter.deserialize::<Vec<String>>(&formatter.serialize(&words)?)?, words);

    let grid = vec![vec![1i64, 2], vec![], vec![3]];
    assert_eq!(formatter.deserialize::<Vec<Vec<i64>>>(&formatter.serialize(&grid)?)?, grid);

    let sparse = vec![Some(1i64), None, Some(3)];
    assert_eq!(formatter.deserialize::<Vec<Option<i64>>>(&formatter.serialize(&sparse)?)?, sparse);

    assert_eq!(formatter.deserialize::<Vec<i64>>("[4, 5, 6]")?, vec![4, 5, 6]);
    assert!(matches!(
        formatter.deserialize::<Vec<i64>>("[4, five]"),
        Err(Error::Format { .. })
    ));
    assert!(matches!(
        formatter.deserialize::<Vec<u8>>("[1]"),
        Err(Error::NoConverter(_))
    ));
    Ok(())
}

#[test]
fn json_values_round_trip() -> Result<()> {
    let formatter = formatter();

    let values = [
        json!(null),
        json!({}),
        json!([]),
        json!("0o17"),
        json!("+.inf"),
        json!(["0x1F", "+12", ".NaN", "null", "it's"]),
        json!({
            "name": "svc",
            "port": 8080,
            "ratio": 0.5,
            "big": u64::MAX,
            "flags": [true, false, null],
            "nested": { "deeper": { "deepest": [[1, [2, [3]]], "true", "1.5"] } },
        }),
    ];

    for value in values {
        let text = formatter.serialize(&value)?;
        assert_eq!(formatter.deserialize::<Value>(&text)?, value);
    }
    Ok(())
}

#[test]
fn json_values_from_yaml() -> Result<()> {
    let formatter = formatter();

    let value = formatter.deserialize::<Value>("a: [1, 2.5, true, ~, text]\nb:\n  c: 'quoted'\n")?;
    assert_eq!(value, json!({ "a": [1, 2.5, true, null, "text"], "b": { "c": "quoted" } }));

    assert!(matches!(
        formatter.deserialize::<Value>("[.inf]"),
        Err(Error::Format { .. })
    ));
    assert!(matches!(
        formatter.deserialize::<Value>("a: 1\nb: 2\na: 3\n"),
        Err(Error::Format { .. })
    ));
    Ok(())
}

#[test]
fn json_depth_follows_the_formatter() {
    let formatter = YamlFormatter::new(YamlFormatterOptions {
        max_depth: 3,
        ..Default::default()
    })
    .with_converter(JsonValueConverter::default().into_converter());

    assert!(formatter.serialize(&json!([[1]])).is_ok());
    assert!(matches!(
        formatter.serialize(&json!([[[[1]]]])),
        Err(Error::DepthLimitExceeded(3))
    ));
    assert!(matches!(
        formatter.deserialize::<Value>("[[[[1]]]]"),
        Err(Error::DepthLimitExceeded(3))
    ));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Limits {
    cpu: f64,
    memory: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Service {
    name: String,
    port: u16,
    tags: Vec<String>,
    limits: Option<Limits>,
}

#[test]
fn serde_types_round_trip() -> Result<()> {
    let formatter = formatter()
        .with_converter(SerdeConverter::<Service>::new().into_converter())
        .with_converter(NullableConverter::new(SerdeConverter::<Limits>::new()).into_converter());

    let bare = Service {
        name: "api".into(),
        port: 8080,
        tags: vec![],
        limits: None,
    };
    let full = Service {
        name: "worker".into(),
        port: 9000,
        tags: vec!["batch".into(), "42".into()],
        limits: Some(Limits {
            cpu: 1.5,
            memory: 1 << 30,
        }),
    };

    let odd_name = Service {
        name: "0o17".into(),
        port: 1,
        tags: vec!["+1".into()],
        limits: None,
    };

    for service in [bare, full, odd_name] {
        let text = formatter.serialize(&service)?;
        assert_eq!(formatter.deserialize::<Service>(&text)?, service);
    }

    assert_eq!(formatter.deserialize::<Option<Limits>>("~")?, None);
    assert!(matches!(
        formatter.deserialize::<Service>("name: api\nport: high\ntags: []\n"),
        Err(Error::DeserializeError(_))
    ));
    Ok(())
}

#[test]
fn options_load_from_yaml() -> Result<()> {
    let options = load_options("max_depth: 8\nfloat_precision: 3\ndocument_start_marker: true\n")?;
    assert_eq!(options.max_depth, 8);
    assert_eq!(options.float_precision, Some(3));
    assert!(options.document_start_marker);
    assert!(options.trailing_newline);

    assert_eq!(load_options("")?, YamlFormatterOptions::default());
    assert_eq!(load_options("# defaults\n")?, YamlFormatterOptions::default());
    assert!(matches!(load_options("max_depth: nope"), Err(Error::DeserializeError(_))));
    Ok(())
}

#[tokio::test]
async fn serde_types_over_async_streams() -> Result<()> {
    let formatter = formatter().with_converter(SerdeConverter::<Limits>::new().into_converter());
    let limits = Limits {
        cpu: 0.25,
        memory: 512,
    };

    let mut buf: Vec<u8> = Vec::new();
    formatter.serialize_to_async_writer(&limits, &mut buf).await?;

    let mut input = buf.as_slice();
    let back: Limits = formatter.deserialize_from_async_reader(&mut input).await?;
    assert_eq!(back, limits);
    Ok(())
}
