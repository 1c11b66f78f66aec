use payqr::{
    FormField, ImageFormat, PaymentFormInput, RenderOptions, UriConfig, build_uri, render_payment,
};

fn uri_defaults() -> UriConfig {
    UriConfig::default()
}

#[test]
fn equivalent_inputs_produce_identical_uris() {
    let cfg = uri_defaults();

    let input_a = PaymentFormInput::new("  Shop@Bank ", "  Shop   Name!! ")
        .with_amount("49.5")
        .with_note("  Table 4 ");
    let input_b = PaymentFormInput::new("shop@bank", "Shop Name")
        .with_amount("49.50")
        .with_note("Table 4");

    let uri_a = build_uri(&input_a, &cfg).expect("first uri");
    let uri_b = build_uri(&input_b, &cfg).expect("second uri");

    assert_eq!(uri_a, uri_b);
    assert_eq!(
        uri_a.as_str(),
        "upi://pay?pa=shop@bank&pn=Shop%20Name&am=49.50&tn=Table%204&cu=INR"
    );
}

#[test]
fn field_edit_order_does_not_matter() {
    let cfg = uri_defaults();

    let mut forward = PaymentFormInput::default();
    for (field, value) in [
        (FormField::PayeeId, "cafe@upi"),
        (FormField::PayeeName, "Corner Cafe"),
        (FormField::Amount, "120"),
        (FormField::Note, "Coffee"),
    ] {
        forward.set(field, value);
    }

    let mut backward = PaymentFormInput::default();
    backward.set(FormField::Note, "Coffee");
    backward.set(FormField::Amount, "120");
    backward.set(FormField::PayeeName, "Corner Cafe");
    backward.set(FormField::PayeeId, "cafe@upi");

    assert_eq!(
        build_uri(&forward, &cfg).unwrap().as_str(),
        build_uri(&backward, &cfg).unwrap().as_str()
    );
}

#[test]
fn repeated_builds_are_byte_identical() {
    let cfg = uri_defaults();
    let input = PaymentFormInput::new("Jose.Avila@Banco", "José Ávila & Sons")
        .with_amount("1234.565")
        .with_note("Invoice #88 / March");

    let first = build_uri(&input, &cfg).unwrap();
    assert_eq!(first.param("pn").as_deref(), Some("Jose Avila Sons"));
    for _ in 0..10 {
        assert_eq!(build_uri(&input, &cfg).unwrap().as_str(), first.as_str());
    }
}

#[tokio::test]
async fn rendered_images_are_stable() {
    let cfg = uri_defaults();
    let input = PaymentFormInput::new("shop@bank", "Shop").with_amount("10");
    let options = RenderOptions::default().with_size(200);

    for format in [ImageFormat::Png, ImageFormat::Svg] {
        let a = render_payment(&input, &cfg, &options, format).await.unwrap();
        let b = render_payment(&input, &cfg, &options, format).await.unwrap();
        assert_eq!(a.uri, b.uri);
        assert_eq!(a.image.data, b.image.data);
    }
}
