use payqr::{
    ImageFormat, PayqrConfig, PayqrError, PaymentFormInput, RenderError, RenderOptions, UriConfig,
    UriError, build_minimal_uri, build_uri, render_payment, validate_required,
};

fn cfg() -> UriConfig {
    UriConfig::default()
}

#[test]
fn blank_payee_id_is_missing_field() {
    let input = PaymentFormInput::new("   ", "Shop");
    assert_eq!(
        build_uri(&input, &cfg()),
        Err(UriError::MissingField("payee_id"))
    );
    assert_eq!(
        validate_required(&input),
        Err(UriError::MissingField("payee_id"))
    );
}

#[test]
fn blank_payee_name_is_missing_field() {
    let input = PaymentFormInput::new("x@y", "");
    assert_eq!(
        build_uri(&input, &cfg()),
        Err(UriError::MissingField("payee_name"))
    );
}

#[test]
fn malformed_payee_id_is_rejected() {
    for raw in ["shop", "@bank", "shop@", "shop@bank@x", "sh op@bank", "shop_1@bank"] {
        let input = PaymentFormInput::new(raw, "Shop");
        let err = build_uri(&input, &cfg()).unwrap_err();
        assert!(
            matches!(err, UriError::InvalidPayeeId(_)),
            "{raw:?} gave {err:?}"
        );
        assert!(err.is_validation());
    }
}

#[test]
fn optional_irregularities_never_fail() {
    let input = PaymentFormInput::new("x@y", "z")
        .with_amount("lots")
        .with_note("!!!");
    let uri = build_uri(&input, &cfg()).unwrap();
    assert_eq!(uri.keys(), vec!["pa", "pn", "cu"]);

    let input = PaymentFormInput::new("x@y", "z").with_amount("100000.01");
    let uri = build_uri(&input, &cfg()).unwrap();
    assert_eq!(uri.param("am"), None);

    for amount in ["0", "-5", "0.004"] {
        let input = PaymentFormInput::new("x@y", "z").with_amount(amount);
        assert_eq!(build_uri(&input, &cfg()).unwrap().param("am"), None, "{amount}");
    }
}

#[test]
fn oversized_uri_falls_back_to_minimal() {
    let tight = UriConfig {
        max_uri_bytes: 60,
        ..UriConfig::default()
    };
    let input = PaymentFormInput::new("shop@bank", "Shop")
        .with_amount("10")
        .with_note("A fairly long note that pushes the uri over the limit");

    let uri = build_uri(&input, &tight).unwrap();
    assert_eq!(uri, build_minimal_uri(&input, &tight).unwrap());
    assert_eq!(uri.keys(), vec!["pa", "pn", "cu"]);
}

#[test]
fn minimal_uri_that_is_still_too_long_errors() {
    let tiny = UriConfig {
        max_uri_bytes: 10,
        ..UriConfig::default()
    };
    let input = PaymentFormInput::new("shop@bank", "Shop");
    assert!(matches!(
        build_uri(&input, &tiny),
        Err(UriError::TooLong { max: 10, .. })
    ));
}

#[test]
fn invalid_uri_config_is_reported() {
    let bad = UriConfig {
        currency: "rupee".into(),
        ..UriConfig::default()
    };
    let input = PaymentFormInput::new("shop@bank", "Shop");
    assert!(matches!(
        build_uri(&input, &bad),
        Err(UriError::InvalidConfig(_))
    ));
}

#[tokio::test]
async fn undecodable_logo_surfaces_render_error() {
    let input = PaymentFormInput::new("shop@bank", "Shop");
    let options = RenderOptions::default().with_logo(vec![1u8, 2, 3, 4]);
    let err = render_payment(&input, &cfg(), &options, ImageFormat::Png)
        .await
        .unwrap_err();
    assert!(matches!(err, PayqrError::Render(RenderError::Logo(_))));
}

#[test]
fn config_errors_name_the_section() {
    let err = PayqrConfig::from_yaml("version: \"1.0\"\nregen:\n  min_contrast_ratio: 50\n")
        .unwrap_err();
    assert!(err.to_string().contains("regen"));

    let err = PayqrConfig::from_yaml("version: [").unwrap_err();
    assert!(err.to_string().contains("YAML"));
}
