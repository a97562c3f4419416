use svgframes::{AttributeKey, Document, Options, UnrankedFrames, XmlOptions};

fn ids(doc: &Document) -> Vec<String> {
    doc.frames().iter().map(|f| f.rect().id.clone()).collect()
}

fn attr<'a>(doc: &'a Document, idx: usize, key: AttributeKey) -> Option<&'a str> {
    doc.frames()[idx].attributes().get(key)
}

#[test]
fn ranks_order_frames() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='100' height='100'/>
        <rect id='r2' x='200' y='0' width='100' height='100'/>
        <text x='205' y='5'><tspan>1</tspan></text>
        <text x='5' y='5'><tspan>2</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r2", "r1"]);
    assert_eq!(doc.frames()[0].rank(), Some(1));
    assert_eq!(doc.frames()[1].rank(), Some(2));
    assert_eq!(attr(&doc, 0, AttributeKey::Sequence), Some("1"));
    assert_eq!(attr(&doc, 0, AttributeKey::Id), Some("1"));
    assert_eq!(attr(&doc, 1, AttributeKey::Title), Some("2"));
    assert_eq!(attr(&doc, 1, AttributeKey::RefId), Some("r1"));
}

#[test]
fn closest_label_wins() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='100' height='100'/>
        <rect id='r2' x='200' y='0' width='100' height='100'/>
        <text x='30' y='30'><tspan>1</tspan></text>
        <text x='1' y='1'><tspan>3</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    // r1 takes rank 3, r2 is unranked and goes last.
    assert_eq!(ids(&doc), vec!["r1", "r2"]);
    assert_eq!(doc.frames()[0].rank(), Some(3));
    assert_eq!(doc.frames()[1].rank(), None);
    assert_eq!(attr(&doc, 1, AttributeKey::Sequence), Some("2"));
}

#[test]
fn equidistant_label_goes_to_first_frame() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
        <text x='100' y='0'><tspan>4</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r1", "r2"]);
    assert_eq!(doc.frames()[0].rank(), Some(4));
}

#[test]
fn equal_ranks_keep_document_order() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
        <rect id='r3' x='400' y='0' width='10' height='10'/>
        <text x='400' y='0'><tspan>1</tspan></text>
        <text x='200' y='0'><tspan>2</tspan></text>
        <text x='0' y='0'><tspan>2</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r3", "r1", "r2"]);
}

#[test]
fn transition_label() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='100' height='100'/>
        <rect id='r2' x='200' y='0' width='100' height='100'/>
        <text x='195' y='0'><tspan>2s</tspan></text>
        <text x='10' y='0'><tspan>not a label</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r1", "r2"]);
    assert_eq!(doc.frames()[1].transition(), Some(2.0));
    assert_eq!(attr(&doc, 1, AttributeKey::TransitionDurationMs), Some("2000.000"));
    assert_eq!(attr(&doc, 0, AttributeKey::TransitionDurationMs), Some("1000.0"));
    assert_eq!(doc.texts().len(), 2);
}

#[test]
fn unranked_reading_order() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='a' x='0' y='100' width='10' height='10'/>
        <rect id='b' x='100' y='0' width='10' height='10'/>
        <rect id='c' x='0' y='0' width='10' height='10'/>
        <rect id='d' x='100' y='110' width='10' height='10'/>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["c", "b", "a", "d"]);
    for (i, frame) in doc.frames().iter().enumerate() {
        let index = (i + 1).to_string();
        assert_eq!(frame.attributes().get(AttributeKey::Sequence), Some(index.as_str()));
    }
}

#[test]
fn unranked_are_skipped() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
        <text x='200' y='0'><tspan>7</tspan></text>
    </svg>
    ";

    let opt = Options {
        unranked: UnrankedFrames::Skip,
        ..Options::default()
    };
    let doc = Document::convert(svg, &opt).unwrap();
    assert_eq!(ids(&doc), vec!["r2"]);
    assert_eq!(attr(&doc, 0, AttributeKey::Sequence), Some("1"));
}

#[test]
fn transformed_rect() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='0' y='0' width='10' height='10' transform='translate(300)'/>
        <text x='290' y='0'><tspan>1</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r2", "r1"]);
    assert_eq!(doc.frames()[0].rect().anchor, svgframes::Point::new(300.0, 0.0));
}

#[test]
fn layers() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
        <g inkscape:label='Frames' inkscape:groupmode='layer'>
            <rect id='r1' x='0' y='0' width='10' height='10'/>
            <rect id='r2' x='200' y='0' width='10' height='10'/>
        </g>
        <g inkscape:label='Labels' inkscape:groupmode='layer'>
            <rect id='background' x='100' y='0' width='10' height='10'/>
            <text x='200' y='0'><tspan>1</tspan></text>
        </g>
        <text x='0' y='0'><tspan>2</tspan></text>
    </svg>
    ";

    let opt = Options {
        frame_layer: Some("Frames".to_string()),
        annotation_layer: Some("Labels".to_string()),
        ..Options::default()
    };
    let doc = Document::convert(svg, &opt).unwrap();
    assert_eq!(ids(&doc), vec!["r2", "r1"]);
    assert_eq!(doc.texts().len(), 1);
    assert_eq!(doc.frames()[1].rank(), None);
}

#[test]
fn transition_paths() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'
         xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
        <g inkscape:label='Paths'>
            <path id='path1' d='m 0,0 150,0 40,0'/>
        </g>
        <path id='path2' d='m 0,0 10,0'/>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert!(doc.paths().is_empty());
    assert_eq!(attr(&doc, 1, AttributeKey::TransitionPath), None);

    let opt = Options {
        path_layer: Some("Paths".to_string()),
        ..Options::default()
    };
    let doc = Document::convert(svg, &opt).unwrap();
    assert_eq!(doc.paths().len(), 1);
    assert_eq!(attr(&doc, 0, AttributeKey::TransitionPath), None);
    assert_eq!(attr(&doc, 1, AttributeKey::TransitionPath), Some("path1"));
}

#[test]
fn defaults_are_applied() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
    </svg>
    ";

    let opt = Options {
        defaults: vec![
            ("timeout-enable".to_string(), "true".to_string()),
            ("timeout-ms".to_string(), "3000.0".to_string()),
            ("no-such-attribute".to_string(), "1".to_string()),
        ],
        ..Options::default()
    };
    let doc = Document::convert(svg, &opt).unwrap();
    for frame in doc.frames() {
        assert_eq!(frame.attributes().get(AttributeKey::TimeoutEnable), Some("true"));
        assert_eq!(frame.attributes().get(AttributeKey::TimeoutMs), Some("3000.0"));
    }
}

#[test]
fn relabel() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
        <text x='0' y='0'><tspan>9</tspan></text>
        <text x='200' y='0'><tspan>5</tspan></text>
        <text x='100' y='100'><tspan>a &amp; b</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r2", "r1"]);

    let relabeled = doc.relabeled_svg();
    assert_eq!(relabeled.len(), svg.len());
    assert!(relabeled.contains("<text x='0' y='0'><tspan>2</tspan></text>"));
    assert!(relabeled.contains("<text x='200' y='0'><tspan>1</tspan></text>"));
    assert!(relabeled.contains("<tspan>a &amp; b</tspan>"));
    assert!(svgframes::roxmltree::Document::parse(&relabeled).is_ok());
}

#[test]
fn relabel_without_changes() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><text x='0' y='0'><tspan>1</tspan></text></svg>";
    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert!(doc.frames().is_empty());
    assert_eq!(doc.relabeled_svg(), svg);
}

#[test]
fn missing_attributes() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><rect id='r1' y='0' width='1' height='1'/></svg>";
    let err = Document::convert(svg, &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "element 'r1' has no 'x' attribute");

    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><rect x='0' y='0' width='1' height='1'/></svg>";
    let err = Document::convert(svg, &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "element 'unnamed' has no 'id' attribute");

    let svg = "<svg xmlns='http://www.w3.org/2000/svg'><text id='t1' x='0'><tspan>1</tspan></text></svg>";
    let err = Document::convert(svg, &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "element 't1' has no 'y' attribute");
}

#[test]
fn invalid_xml() {
    let err = Document::convert("<svg", &Options::default()).unwrap_err();
    assert!(matches!(err, svgframes::Error::ParsingFailed(_)));
}

#[test]
fn non_svg_elements_are_ignored() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg' xmlns:x='http://example.com'>
        <x:rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='0' y='0' width='10' height='10'/>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r2"]);
}

#[test]
fn write_frames() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
        <text x='200' y='0'><tspan>1</tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    let xml = doc.to_string(&XmlOptions::default());
    assert!(xml.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(xml.contains("xmlns:ns1=\"http://sozi.baierouge.fr\""));
    assert!(xml.contains("ns1:creator=\"creator\""));
    assert!(xml.contains("<ns1:frame id=\"1\" ns1:title=\"1\" ns1:refid=\"r2\""));
    assert!(xml.contains("<ns1:frame id=\"2\" ns1:title=\"2\" ns1:refid=\"r1\""));
    assert!(!xml.contains("transition-path="));

    let parsed = svgframes::roxmltree::Document::parse(&xml).unwrap();
    let frames: Vec<_> = parsed
        .descendants()
        .filter(|n| n.has_tag_name(("http://sozi.baierouge.fr", "frame")))
        .collect();
    assert_eq!(frames.len(), 2);
    assert_eq!(
        frames[0].attribute(("http://sozi.baierouge.fr", "sequence")),
        Some("1")
    );
}

#[test]
fn empty_document() {
    let svg = "<svg xmlns='http://www.w3.org/2000/svg'/>";
    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert!(doc.frames().is_empty());

    let xml = doc.to_string(&XmlOptions::default());
    let parsed = svgframes::roxmltree::Document::parse(&xml).unwrap();
    assert!(parsed.root_element().has_tag_name(("http://www.w3.org/2000/svg", "svg")));
    assert_eq!(parsed.root_element().children().filter(|n| n.is_element()).count(), 0);
}

#[test]
fn far_apart_unranked_frames() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='1e7' width='10' height='10'/>
        <rect id='r2' x='0' y='0' width='10' height='10'/>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r2", "r1"]);

    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='0' y='1e300' width='10' height='10'/>
    </svg>
    ";

    let err = Document::convert(svg, &Options::default()).unwrap_err();
    assert_eq!(err.to_string(), "binning failed: too many bins");

    // Skipped frames are not binned.
    let opt = Options {
        unranked: UnrankedFrames::Skip,
        ..Options::default()
    };
    assert!(Document::convert(svg, &opt).unwrap().frames().is_empty());

    let opt = Options {
        row_height: 1e-300,
        ..Options::default()
    };
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='0' y='1' width='10' height='10'/>
    </svg>
    ";
    assert!(Document::convert(svg, &opt).is_err());
}

#[test]
fn relabel_with_trailing_empty_span() {
    let svg = "
    <svg xmlns='http://www.w3.org/2000/svg'>
        <rect id='r1' x='0' y='0' width='10' height='10'/>
        <rect id='r2' x='200' y='0' width='10' height='10'/>
        <text x='0' y='0'><tspan>8</tspan><tspan/></text>
        <text x='200' y='0'><tspan>4</tspan><tspan></tspan></text>
    </svg>
    ";

    let doc = Document::convert(svg, &Options::default()).unwrap();
    assert_eq!(ids(&doc), vec!["r2", "r1"]);

    let relabeled = doc.relabeled_svg();
    assert!(relabeled.contains("<text x='0' y='0'><tspan>2</tspan><tspan/></text>"));
    assert!(relabeled.contains("<text x='200' y='0'><tspan>1</tspan><tspan></tspan></text>"));
}
