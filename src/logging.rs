use tracing_subscriber::EnvFilter;

/// stderr로 나가는 로그 구독자를 설치한다. `RUST_LOG`가 있으면 그 필터를 따른다.
///
/// stdout은 CLI 출력과 호스트 메시지 전용이다. 두 번째 호출부터는 무시된다.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
