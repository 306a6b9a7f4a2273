//! Автоматический выключатель для запросов к API кинотеатра.
//!
//! Повторных попыток клиент не делает: после серии отказов сервиса (сетевые
//! ошибки, ответы 5xx) запросы блокируются до истечения таймаута.

use std::sync::{Mutex, PoisonError, RwLock};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

/// Состояния "Автоматического выключателя".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// **Closed**: нормальный режим, запросы разрешены.
    Closed,
    /// **Open**: запросы запрещены до истечения таймаута.
    Open,
    /// **HalfOpen**: пропускаем один пробный запрос, чтобы проверить, ожил ли
    /// сервис; остальные ждут его результата.
    HalfOpen,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    state: RwLock<CircuitState>,
    /// Счетчик последовательных сбоев.
    failure_count: AtomicU32,
    /// Момент перехода в Open.
    opened_at: Mutex<Option<Instant>>,
    /// Пробный запрос в HalfOpen уже выдан.
    probe_in_flight: AtomicBool,
    failure_threshold: u32,
    timeout_duration: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, timeout_seconds: u64) -> Self {
        Self::with_timeout(failure_threshold, Duration::from_secs(timeout_seconds))
    }

    pub fn with_timeout(failure_threshold: u32, timeout_duration: Duration) -> Self {
        Self {
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            opened_at: Mutex::new(None),
            probe_in_flight: AtomicBool::new(false),
            failure_threshold: failure_threshold.max(1),
            timeout_duration,
        }
    }

    /// Проверяет, можно ли выполнить следующий запрос к сервису.
    pub fn can_execute(&self) -> bool {
        let state = *self.state.read().unwrap_or_else(PoisonError::into_inner);

        match state {
            CircuitState::Closed => true,
            CircuitState::HalfOpen => self.claim_probe(),
            CircuitState::Open => {
                let opened_at = *self.opened_at.lock().unwrap_or_else(PoisonError::into_inner);
                let cooled_down = opened_at
                    .map(|at| at.elapsed() >= self.timeout_duration)
                    .unwrap_or(true);
                if !cooled_down {
                    return false;
                }

                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                if *state == CircuitState::Open {
                    *state = CircuitState::HalfOpen;
                    self.probe_in_flight.store(false, Ordering::Release);
                    info!("Circuit breaker transitioning to HalfOpen state");
                }
                drop(state);
                self.claim_probe()
            }
        }
    }

    fn claim_probe(&self) -> bool {
        self.probe_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn record_success(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.probe_in_flight.store(false, Ordering::Release);

        match *state {
            // Пробный запрос прошёл, замыкаем цепь.
            CircuitState::HalfOpen => {
                *state = CircuitState::Closed;
                self.failure_count.store(0, Ordering::Relaxed);
                info!("Circuit breaker recovered - transitioning to Closed state");
            }
            CircuitState::Closed => {
                self.failure_count.store(0, Ordering::Relaxed);
            }
            CircuitState::Open => {}
        }
    }

    pub fn record_failure(&self) {
        let failure_count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        self.probe_in_flight.store(false, Ordering::Release);

        let open = match *state {
            CircuitState::Closed if failure_count >= self.failure_threshold => {
                error!(
                    "Circuit breaker OPENED - {} failures reached threshold {}",
                    failure_count, self.failure_threshold
                );
                true
            }
            // Пробный запрос провалился, обратно в Open.
            CircuitState::HalfOpen => {
                warn!("Circuit breaker test failed - returning to Open state");
                true
            }
            _ => false,
        };

        if open {
            *state = CircuitState::Open;
            *self.opened_at.lock().unwrap_or_else(PoisonError::into_inner) = Some(Instant::now());
        }
    }

    pub fn state(&self) -> CircuitState {
        *self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_threshold() {
        let breaker = CircuitBreaker::new(3, 60);
        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.can_execute());

        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.can_execute());
    }

    #[test]
    fn success_resets_failure_count() {
        let breaker = CircuitBreaker::new(2, 60);
        breaker.record_failure();
        breaker.record_success();
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 1);
    }

    #[test]
    fn half_open_after_timeout_then_recovers() {
        let breaker = CircuitBreaker::with_timeout(1, Duration::ZERO);
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);

        assert!(breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);

        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn half_open_lets_through_a_single_trial() {
        let breaker = CircuitBreaker::with_timeout(1, Duration::ZERO);
        breaker.record_failure();

        assert!(breaker.can_execute());
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
        assert!(!breaker.can_execute());
        assert!(!breaker.can_execute());

        breaker.record_success();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.can_execute());
        assert!(breaker.can_execute());
    }

    #[test]
    fn failed_probe_reopens() {
        let breaker = CircuitBreaker::with_timeout(1, Duration::ZERO);
        breaker.record_failure();
        assert!(breaker.can_execute());
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
    }
}
