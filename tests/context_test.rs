use castle_scene::context::{BackendChoice, FALLBACK, PRIMARY, choose_backend};

fn choose(answer: Result<(), String>) -> (BackendChoice, Vec<&'static str>) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut probed = Vec::new();
    let choice = runtime.block_on(choose_backend(async |choice: BackendChoice| {
        probed.push(choice.name);
        answer.clone()
    }));
    (choice, probed)
}

#[test]
fn primary_backend_is_kept_when_it_has_an_adapter() {
    let (choice, probed) = choose(Ok(()));
    assert_eq!(choice, PRIMARY);
    assert_eq!(probed, [PRIMARY.name]);
}

#[test]
fn fallback_is_picked_after_a_single_surfaceless_probe() {
    let (choice, probed) = choose(Err("no adapter".to_string()));
    assert_eq!(choice, FALLBACK);
    // only the primary set is probed; the fallback is tried by creating the
    // one and only surface on it
    assert_eq!(probed, [PRIMARY.name]);
}

#[test]
fn fallback_is_the_gl_backend() {
    assert_ne!(PRIMARY.backends, FALLBACK.backends);
    assert_eq!(FALLBACK.backends, wgpu::Backends::GL);
}
