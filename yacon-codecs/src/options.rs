use crate::{
    BoolConverter, F64Converter, I32Converter, I64Converter, JsonValueConverter,
    NullableConverter, SequenceConverter, SerdeConverter, StringConverter, U64Converter,
};

use yacon_core::{Error, Result, TypedConverter, YamlFormatter, YamlFormatterOptions};

pub fn default_formatter(options: YamlFormatterOptions) -> YamlFormatter {
    YamlFormatter::new(options)
        .with_converter(BoolConverter.into_converter())
        .with_converter(I64Converter.into_converter())
        .with_converter(I32Converter.into_converter())
        .with_converter(U64Converter.into_converter())
        .with_converter(F64Converter::default().into_converter())
        .with_converter(StringConverter.into_converter())
        .with_converter(NullableConverter::new(BoolConverter).into_converter())
        .with_converter(NullableConverter::new(I64Converter).into_converter())
        .with_converter(NullableConverter::new(F64Converter::default()).into_converter())
        .with_converter(NullableConverter::new(StringConverter).into_converter())
        .with_converter(SequenceConverter::<bool>::new().into_converter())
        .with_converter(SequenceConverter::<i64>::new().into_converter())
        .with_converter(SequenceConverter::<f64>::new().into_converter())
        .with_converter(SequenceConverter::<String>::new().into_converter())
        .with_converter(JsonValueConverter::default().into_converter())
}

/// Reads formatter options from YAML. Missing fields keep their defaults
/// and an empty document yields the default options.
pub fn load_options(yaml: &str) -> Result<YamlFormatterOptions> {
    let formatter = YamlFormatter::default()
        .with_converter(SerdeConverter::<YamlFormatterOptions>::new().into_converter());

    let options = match formatter.deserialize::<YamlFormatterOptions>(yaml) {
        Err(Error::EmptyDocument) => YamlFormatterOptions::default(),
        result => result?,
    };
    tracing::debug!(?options, "loaded formatter options");
    Ok(options)
}
