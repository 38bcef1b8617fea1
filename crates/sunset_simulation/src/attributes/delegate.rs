//! DamageTaken уведомление + явный список подписчиков

use bevy::prelude::*;

/// Событие: актор получил урон (Health delta < 0)
///
/// Публикуется и через список подписчиков NeonAttributeSet, и как Bevy Event
/// (для ECS реакций: AI, UI).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageTaken {
    /// |delta| — запрошенная величина, не обрезанная по текущему HP
    pub damage: f32,
    pub target: Entity,
}

pub type DamageTakenCallback = Box<dyn FnMut(&DamageTaken) + Send + Sync>;

/// Multicast список подписчиков (fire-and-forget)
///
/// Вызов синхронный, в порядке регистрации. Отписка не требуется.
#[derive(Default)]
pub struct DamageTakenDelegate {
    subscribers: Vec<DamageTakenCallback>,
}

impl DamageTakenDelegate {
    pub fn add(&mut self, callback: impl FnMut(&DamageTaken) + Send + Sync + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn is_bound(&self) -> bool {
        !self.subscribers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn broadcast(&mut self, event: &DamageTaken) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }
}

impl std::fmt::Debug for DamageTakenDelegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DamageTakenDelegate")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_broadcast_empty_is_noop() {
        let mut delegate = DamageTakenDelegate::default();
        assert!(!delegate.is_bound());

        delegate.broadcast(&DamageTaken {
            damage: 5.0,
            target: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn test_broadcast_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut delegate = DamageTakenDelegate::default();

        for id in 0..3 {
            let order = order.clone();
            delegate.add(move |event: &DamageTaken| {
                order.lock().unwrap().push((id, event.damage));
            });
        }

        delegate.broadcast(&DamageTaken {
            damage: 12.0,
            target: Entity::PLACEHOLDER,
        });

        assert_eq!(delegate.len(), 3);
        assert_eq!(*order.lock().unwrap(), vec![(0, 12.0), (1, 12.0), (2, 12.0)]);
    }
}
