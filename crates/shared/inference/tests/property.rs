use agri_domain::crop::CropLabel;
use agri_domain::sample::AgronomicSample;
use agri_inference::{Decoded, FeatureVectorBuilder, LabelCodec, YieldEstimate};
use proptest::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn codec_is_a_bijection_over_the_table() {
    let codec = LabelCodec::new();
    for label in CropLabel::iter() {
        let encoded = codec.encode(label.name());
        assert!(encoded.is_known());
        assert_eq!(codec.decode(encoded.index() as i64), Decoded::Known(label));
    }
}

proptest! {
    #[test]
    fn decode_then_encode_returns_the_index(index in 0i64..22) {
        let codec = LabelCodec::new();
        let name = codec.decode(index).name();
        prop_assert_eq!(codec.encode(name).index() as i64, index);
    }

    #[test]
    fn indices_outside_the_table_are_unknown(index in prop_oneof![i64::MIN..0, 22i64..i64::MAX]) {
        prop_assert_eq!(LabelCodec::new().decode(index), Decoded::Unknown(index));
    }

    #[test]
    fn unlisted_names_fall_back_to_zero(name in "[a-z]{1,12}") {
        let codec = LabelCodec::new();
        let encoded = codec.encode(&name);
        if CropLabel::iter().all(|label| label.name() != name) {
            prop_assert!(!encoded.is_known());
            prop_assert_eq!(encoded.index(), 0);
        }
    }

    #[test]
    fn yield_is_non_negative_with_two_decimals(raw in -1.0e6f64..1.0e6) {
        let value = YieldEstimate::from_raw(raw).kg_per_acre();
        prop_assert!(value >= 0.0);
        let cents = value * 100.0;
        prop_assert!((cents - cents.round()).abs() < 1e-6);
        if raw > 0.01 {
            prop_assert!((value - raw).abs() <= 0.005 + 1e-9);
        }
    }

    #[test]
    fn huge_yields_are_kept_verbatim(raw in 1.0e16f64..=f64::MAX) {
        let estimate = YieldEstimate::from_raw(raw);
        prop_assert!(estimate.kg_per_acre().is_finite());
        prop_assert_eq!(estimate.kg_per_acre(), raw);
        prop_assert_eq!(estimate.to_string().parse::<f64>().ok(), Some(raw));
    }

    #[test]
    fn classification_vector_is_the_sample_in_canonical_order(
        values in proptest::array::uniform7(-1.0e4f64..1.0e4)
    ) {
        let [nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall] = values;
        let sample =
            AgronomicSample { nitrogen, phosphorus, potassium, temperature, humidity, ph, rainfall };
        let vector = FeatureVectorBuilder::classification().assemble(&sample, None, &LabelCodec::new());
        prop_assert_eq!(vector.values.len(), 7);
        for (got, want) in vector.values.iter().zip(values) {
            prop_assert_eq!(got.to_bits(), want.to_bits());
        }
    }
}
