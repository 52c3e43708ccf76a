use dsp_tree::preclude::*;

fn c(re: i64, im: i64, width: usize) -> FixedComplex {
  FixedComplex::from_i64(re, im, width).unwrap()
}

fn demo_input() -> InputVector { InputVector::from_pairs(&DEMO_INPUTS, INPUT_WIDTH).unwrap() }

fn expected() -> FixedComplex { c(DEMO_EXPECTED.0, DEMO_EXPECTED.1, EXACT_OUTPUT_WIDTH) }

#[test]
fn test_demo_exact() {
  let reduction = reduce(&demo_input(), WidthPolicy::Exact);

  let widths = reduction.layers.iter().map(|l| l.width).collect::<Vec<_>>();
  assert_eq!(widths, vec![17, 35, 71]);
  assert_eq!(
    reduction.layers[0].values,
    vec![c(-150, 200, 17), c(-480, 320, 17), c(87, 84, 17), c(1856, 1412, 17)]
  );
  assert_eq!(reduction.layers[1].values, vec![c(8000, -144000, 35), c(42864, 278748, 35)]);
  assert_eq!(reduction.result, expected());
  assert_eq!(reduction.output_width(), EXACT_OUTPUT_WIDTH);
  assert!(!reduction.overflowed);
  assert!(reduction.layers.iter().all(|l| l.lossy == 0));
}

#[test]
fn test_demo_layer_table() {
  let reduction = reduce(&demo_input(), WidthPolicy::LayerTable);

  let widths = reduction.layers.iter().map(|l| l.width).collect::<Vec<_>>();
  assert_eq!(widths, vec![OUTPUT_WIDTH; 3]);
  assert_eq!(reduction.output_width(), OUTPUT_WIDTH);

  // the first two layers fit; the final real part needs more than 35 bits
  assert_eq!(reduction.layers[0].values[3], c(1856, 1412, 35));
  assert_eq!(reduction.layers[1].values, vec![c(8000, -144000, 35), c(42864, 278748, 35)]);
  assert_eq!(reduction.layers.iter().map(|l| l.lossy).collect::<Vec<_>>(), vec![0, 0, 1]);
  assert!(reduction.overflowed);
  assert_eq!(reduction.result, c(6_122_885_632, -3_942_432_000, 35));

  assert!(!check_result(&expected(), &reduction.result, "test_mult"));
}

#[test]
fn test_demo_on_queue() {
  for selector in [DeviceSelector::Emulator, DeviceSelector::Simulator] {
    let queue = Queue::new(selector).unwrap();
    let input = demo_input();
    let result = queue.single_task(move || reduce_exact(&input)).unwrap();
    assert!(check_result(&expected(), &result, "test_mult"));
  }
}

#[test]
fn test_demo_narrow_inputs() {
  // 56 and 34 need 7 signed bits
  let input = InputVector::from_pairs(&DEMO_INPUTS, 7).unwrap();
  let result = reduce_exact(&input);
  assert_eq!(result.width(), grown_width(7, NUM_INPUTS_LOG2));
  assert!(check_result(&expected(), &result, "test_mult"));

  assert!(matches!(
    InputVector::from_pairs(&DEMO_INPUTS, 6),
    Err(Error::OutOfRange { width: 6, .. })
  ));
}

#[test]
fn test_swap_first_pair() {
  let mut swapped = DEMO_INPUTS;
  swapped.swap(0, 1);
  let swapped = reduce(&InputVector::from_pairs(&swapped, INPUT_WIDTH).unwrap(), WidthPolicy::Exact);
  let original = reduce(&demo_input(), WidthPolicy::Exact);

  assert_eq!(swapped.layers[0].values, original.layers[0].values);
  assert_eq!(swapped.result, original.result);
}
