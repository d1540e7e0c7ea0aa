use crate::{AttrValue, DataType, GraphDef, NodeDef, Tensor, TensorValues};

#[test]
fn constant_builder_sets_dtype_and_value() {
    let node = NodeDef::constant("c", Tensor::scalar_float(2.5));

    assert_eq!(node.op, "Const");
    assert!(node.input.is_empty());
    assert_eq!(node.attr["dtype"], AttrValue::Type(DataType::Float));
    assert_eq!(
        node.attr["value"].as_tensor(),
        Some(&Tensor::scalar_float(2.5))
    );
}

#[test]
fn find_and_names() {
    let graph = GraphDef::new(vec![
        NodeDef::new("a", "NoOp"),
        NodeDef::new("b", "Identity").with_input("a"),
    ]);

    assert_eq!(graph.find("b").map(|n| n.op.as_str()), Some("Identity"));
    assert!(graph.find("c").is_none());
    assert_eq!(graph.names().collect::<Vec<_>>(), ["a", "b"]);
}

#[test]
fn tensor_shape_validation() {
    assert!(Tensor::scalar_int(1).validate().is_ok());
    assert!(
        Tensor::new(vec![2, 3], TensorValues::Bool(vec![true; 6]))
            .validate()
            .is_ok()
    );

    let err = Tensor::new(vec![2, 2], TensorValues::Int(vec![1, 2, 3]))
        .validate()
        .unwrap_err();
    assert_eq!(err, "shape [2, 2] holds 4 elements but 3 were given");

    let err = Tensor::new(vec![usize::MAX, 2], TensorValues::Int(vec![1, 2]))
        .validate()
        .unwrap_err();
    assert_eq!(
        err,
        format!("element count of shape [{}, 2] overflows", usize::MAX)
    );
}

#[test]
fn empty_shape_is_scalar() {
    let t = Tensor::scalar_bool(true);
    assert!(t.is_scalar());
    assert_eq!(t.num_elements(), Some(1));
    assert_eq!(t.dtype(), DataType::Bool);
}
