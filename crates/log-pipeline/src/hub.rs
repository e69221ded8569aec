//! 브로드캐스트 허브 -- 라이브 구독자에게 새 엔트리 전달
//!
//! [`Hub`]는 구독자 집합을 소유하는 단일 태스크(액터)입니다.
//! 등록, 해제, 브로드캐스트는 모두 명령 채널을 통해 직렬화되므로
//! 구독자 집합에 별도의 락이 없습니다.
//!
//! # 전달 정책
//! 구독자마다 용량 제한 채널이 있으며, 브로드캐스트는 `try_send`로 전달합니다.
//! 버퍼가 가득 찬 구독자는 그 메시지만 놓치고, 생산자나 다른 구독자는 막히지 않습니다.
//! 수신측이 닫힌 구독자는 다음 브로드캐스트 때 제거됩니다.
//!
//! # 사용 예시
//! ```ignore
//! let cancel = CancellationToken::new();
//! let (hub, handle) = Hub::<Arc<LogEntry>>::new(256, 64, cancel.clone());
//! tokio::spawn(hub.run());
//!
//! let mut sub = handle.subscribe().await?;
//! handle.broadcast(entry).await?;
//! while let Some(entry) = sub.recv().await { /* ... */ }
//! ```

use std::collections::HashMap;

use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use crate::error::LogPipelineError;

/// 허브가 부여하는 구독자 식별자
pub type SubscriberId = u64;

enum HubCommand<T> {
    Register {
        tx: mpsc::Sender<T>,
        ack: oneshot::Sender<SubscriberId>,
    },
    Unregister {
        id: SubscriberId,
        ack: Option<oneshot::Sender<bool>>,
    },
    Broadcast(T),
    Count {
        ack: oneshot::Sender<usize>,
    },
}

/// 구독자 집합을 소유하는 허브 루프
pub struct Hub<T> {
    commands: mpsc::Receiver<HubCommand<T>>,
    subscribers: HashMap<SubscriberId, mpsc::Sender<T>>,
    next_id: SubscriberId,
    cancel: CancellationToken,
}

impl<T: Clone + Send + 'static> Hub<T> {
    /// 허브와 핸들을 생성합니다.
    ///
    /// - `broadcast_buffer`: 명령 큐 용량. 가득 차면 `broadcast`가 대기합니다.
    /// - `subscriber_buffer`: 구독자별 전달 버퍼 용량
    pub fn new(
        broadcast_buffer: usize,
        subscriber_buffer: usize,
        cancel: CancellationToken,
    ) -> (Self, HubHandle<T>) {
        let (tx, rx) = mpsc::channel(broadcast_buffer.max(1));
        let hub = Self {
            commands: rx,
            subscribers: HashMap::new(),
            next_id: 0,
            cancel,
        };
        let handle = HubHandle {
            commands: tx,
            subscriber_buffer: subscriber_buffer.max(1),
        };
        (hub, handle)
    }

    /// 취소되거나 모든 핸들이 사라질 때까지 명령을 처리합니다.
    ///
    /// 종료 시 남은 구독자의 채널을 모두 닫습니다.
    pub async fn run(mut self) {
        tracing::info!("hub loop started");
        loop {
            tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    tracing::debug!("hub cancelled");
                    break;
                }
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
            }
        }

        let remaining = self.subscribers.len();
        self.subscribers.clear();
        metrics::gauge!(zlog_core::metrics::HUB_SUBSCRIBERS).set(0.0);
        tracing::info!(remaining, "hub loop stopped");
    }

    fn handle(&mut self, command: HubCommand<T>) {
        match command {
            HubCommand::Register { tx, ack } => {
                self.next_id += 1;
                let id = self.next_id;
                self.subscribers.insert(id, tx);
                self.update_gauge();
                tracing::debug!(id, total = self.subscribers.len(), "subscriber registered");
                let _ = ack.send(id);
            }
            HubCommand::Unregister { id, ack } => {
                // Sender를 버리면 구독자 쪽 스트림이 끝남
                let removed = self.subscribers.remove(&id).is_some();
                if removed {
                    self.update_gauge();
                    tracing::debug!(id, total = self.subscribers.len(), "subscriber unregistered");
                }
                if let Some(ack) = ack {
                    let _ = ack.send(removed);
                }
            }
            HubCommand::Broadcast(message) => self.broadcast(message),
            HubCommand::Count { ack } => {
                let _ = ack.send(self.subscribers.len());
            }
        }
    }

    fn broadcast(&mut self, message: T) {
        metrics::counter!(zlog_core::metrics::HUB_BROADCAST_TOTAL).increment(1);

        let mut closed = Vec::new();
        for (id, tx) in &self.subscribers {
            match tx.try_send(message.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    metrics::counter!(zlog_core::metrics::HUB_DROPPED_TOTAL).increment(1);
                    tracing::trace!(id, "subscriber buffer full, message dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*id),
            }
        }

        if !closed.is_empty() {
            for id in &closed {
                self.subscribers.remove(id);
            }
            self.update_gauge();
            tracing::debug!(pruned = closed.len(), "removed closed subscribers");
        }
    }

    fn update_gauge(&self) {
        metrics::gauge!(zlog_core::metrics::HUB_SUBSCRIBERS).set(self.subscribers.len() as f64);
    }
}

/// 허브에 명령을 보내는 핸들
///
/// 복제해서 여러 태스크가 공유할 수 있습니다.
pub struct HubHandle<T> {
    commands: mpsc::Sender<HubCommand<T>>,
    subscriber_buffer: usize,
}

impl<T> Clone for HubHandle<T> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            subscriber_buffer: self.subscriber_buffer,
        }
    }
}

impl<T: Send + 'static> HubHandle<T> {
    /// 새 구독자를 등록합니다. 허브 루프가 등록을 반영한 뒤 반환합니다.
    pub async fn subscribe(&self) -> Result<Subscription<T>, LogPipelineError> {
        let (tx, rx) = mpsc::channel(self.subscriber_buffer);
        let (ack, ack_rx) = oneshot::channel();
        self.send(HubCommand::Register { tx, ack }).await?;
        let id = ack_rx.await.map_err(|_| hub_stopped())?;
        Ok(Subscription {
            id,
            rx,
            hub: self.clone(),
            registered: true,
        })
    }

    /// 메시지를 모든 구독자에게 브로드캐스트합니다.
    ///
    /// 명령 큐가 가득 찬 경우에만 대기합니다. 개별 구독자 때문에 막히지 않습니다.
    pub async fn broadcast(&self, message: T) -> Result<(), LogPipelineError> {
        self.send(HubCommand::Broadcast(message)).await
    }

    /// 현재 등록된 구독자 수
    pub async fn subscriber_count(&self) -> Result<usize, LogPipelineError> {
        let (ack, ack_rx) = oneshot::channel();
        self.send(HubCommand::Count { ack }).await?;
        ack_rx.await.map_err(|_| hub_stopped())
    }

    /// 허브 루프가 종료되었는지 확인합니다.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    async fn unregister(&self, id: SubscriberId) -> Result<bool, LogPipelineError> {
        let (ack, ack_rx) = oneshot::channel();
        self.send(HubCommand::Unregister { id, ack: Some(ack) }).await?;
        ack_rx.await.map_err(|_| hub_stopped())
    }

    async fn send(&self, command: HubCommand<T>) -> Result<(), LogPipelineError> {
        self.commands.send(command).await.map_err(|_| hub_stopped())
    }
}

fn hub_stopped() -> LogPipelineError {
    LogPipelineError::Channel("hub is not running".to_owned())
}

/// 등록된 구독자 하나
///
/// 명시적으로 [`Subscription::unregister`]하지 않고 버려지면
/// 백그라운드에서 해제 명령을 보냅니다.
pub struct Subscription<T: Send + 'static> {
    id: SubscriberId,
    rx: mpsc::Receiver<T>,
    hub: HubHandle<T>,
    registered: bool,
}

impl<T: Send + 'static> Subscription<T> {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// 다음 메시지를 기다립니다. 해제되었거나 허브가 종료되면 `None`입니다.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// 허브에서 해제합니다.
    ///
    /// 해제 후에도 이미 버퍼에 들어온 메시지는 [`Subscription::recv`]로 받을 수 있고,
    /// 그 다음 `None`이 반환됩니다.
    pub async fn unregister(&mut self) -> Result<(), LogPipelineError> {
        if !self.registered {
            return Ok(());
        }
        self.registered = false;
        self.hub.unregister(self.id).await.map(|_| ())
    }
}

impl<T: Send + 'static> Drop for Subscription<T> {
    fn drop(&mut self) {
        if !self.registered {
            return;
        }
        let command = HubCommand::Unregister {
            id: self.id,
            ack: None,
        };
        match self.hub.commands.try_send(command) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(command)) => {
                // 런타임 밖이면 다음 브로드캐스트에서 닫힌 채널로 정리됨
                if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                    let commands = self.hub.commands.clone();
                    runtime.spawn(async move {
                        let _ = commands.send(command).await;
                    });
                }
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }
}
