//! 위젯 높이를 호스트(임베딩한 부모 페이지)에 알린다.
//!
//! 계산 엔진과는 독립적이다. 전송 수단은 [`SizeNotifier`] 뒤에 숨기고,
//! 언제 보낼지는 [`ResizeReporter`]가 정한다.

use serde::Serialize;
use std::io::{self, Stdout, Write};
use thiserror::Error;
use tracing::{debug, warn};

/// 높이 메시지를 받을 고정 대상 origin.
pub const TARGET_ORIGIN: &str = "https://mialquilergarantias.com.ar";

/// 호스트로 보내는 메시지 본문: `{ "frameHeight": <px> }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameHeightMessage {
    pub frame_height: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    target_origin: &'a str,
    message: FrameHeightMessage,
}

/// 높이 전송 오류.
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("메시지 출력 오류: {0}")]
    Io(#[from] io::Error),
    #[error("메시지 직렬화 오류: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 현재 높이(px)를 호스트에 알리는 단방향 통지 수단.
pub trait SizeNotifier {
    fn report_size(&mut self, height: u32) -> Result<(), ResizeError>;
}

impl<N: SizeNotifier + ?Sized> SizeNotifier for Box<N> {
    fn report_size(&mut self, height: u32) -> Result<(), ResizeError> {
        (**self).report_size(height)
    }
}

/// 메시지를 한 줄짜리 JSON으로 출력하는 통지기.
///
/// `{"targetOrigin":"https://mialquilergarantias.com.ar","message":{"frameHeight":523}}`
#[derive(Debug)]
pub struct JsonLineNotifier<W: Write> {
    out: W,
    target_origin: String,
}

impl JsonLineNotifier<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLineNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            target_origin: TARGET_ORIGIN.to_string(),
        }
    }

    pub fn target_origin(&self) -> &str {
        &self.target_origin
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SizeNotifier for JsonLineNotifier<W> {
    fn report_size(&mut self, height: u32) -> Result<(), ResizeError> {
        let envelope = Envelope {
            target_origin: &self.target_origin,
            message: FrameHeightMessage {
                frame_height: height,
            },
        };
        serde_json::to_writer(&mut self.out, &envelope)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// 렌더링된 높이를 관찰해 필요할 때만 통지기를 호출한다.
///
/// `mount` 전과 `teardown` 후에는 아무것도 보내지 않는다.
#[derive(Debug)]
pub struct ResizeReporter<N: SizeNotifier> {
    notifier: N,
    last_sent: Option<u32>,
    observing: bool,
}

impl<N: SizeNotifier> ResizeReporter<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            last_sent: None,
            observing: false,
        }
    }

    /// 관찰을 시작하고 현재 높이를 즉시 보낸다.
    pub fn mount(&mut self, height: f32) {
        self.observing = true;
        self.send(height);
    }

    /// 높이가 마지막으로 보낸 값과 다를 때만 보낸다.
    pub fn observe(&mut self, height: f32) {
        if !self.observing {
            return;
        }
        if to_pixels(height).is_some_and(|px| self.last_sent != Some(px)) {
            self.send(height);
        }
    }

    /// 계산 결과가 바뀌었으므로 높이와 무관하게 다시 보낸다.
    pub fn result_changed(&mut self, height: f32) {
        if self.observing {
            self.send(height);
        }
    }

    /// 관찰을 멈춘다. 이후 호출은 무시된다.
    pub fn teardown(&mut self) {
        if self.observing {
            debug!("frame height observer stopped");
        }
        self.observing = false;
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn last_sent(&self) -> Option<u32> {
        self.last_sent
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn into_notifier(self) -> N {
        self.notifier
    }

    fn send(&mut self, height: f32) {
        let Some(px) = to_pixels(height) else {
            debug!(height = %height, "skipping invalid frame height");
            return;
        };
        // 응답을 기다리지 않는 통지라 실패는 기록만 한다
        match self.notifier.report_size(px) {
            Ok(()) => {
                debug!(frame_height = px, "frame height reported");
                self.last_sent = Some(px);
            }
            Err(err) => warn!(error = %err, frame_height = px, "frame height report failed"),
        }
    }
}

/// 잘림이 없도록 올림한 정수 px. 음수/NaN은 None.
fn to_pixels(height: f32) -> Option<u32> {
    if height.is_finite() && height >= 0.0 {
        Some(height.ceil().min(u32::MAX as f32) as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_round_up_and_reject_garbage() {
        assert_eq!(to_pixels(523.0), Some(523));
        assert_eq!(to_pixels(523.2), Some(524));
        assert_eq!(to_pixels(0.0), Some(0));
        assert_eq!(to_pixels(-1.0), None);
        assert_eq!(to_pixels(f32::NAN), None);
        assert_eq!(to_pixels(f32::INFINITY), None);
    }
}
