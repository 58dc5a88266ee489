// ============================================================================
// Tâche périodique annulable
// ============================================================================
// Exécute un callback à intervalle fixe sur le runtime tokio
//
// CONCEPTS RUST :
// 1. tokio::time::interval : horloge périodique async
//    - Le premier tick d'un Interval est immédiat, on le consomme
//      avant la boucle pour que le premier callback arrive après une période
//
// 2. Garantie d'annulation définitive
//    - Chaque callback s'exécute en tenant le verrou `gate`
//    - cancel() prend ce même verrou pour marquer la tâche annulée
//    - => cancel() attend la fin d'un tick en cours, et après son retour
//      plus aucun tick ne peut s'exécuter (le flag est vérifié sous verrou)
//    - abort() libère ensuite la tâche tokio sans attendre son prochain réveil
//
// 3. Drop : une tâche oubliée est annulée automatiquement (RAII)
// ============================================================================

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Poignée sur une tâche périodique en cours
#[derive(Debug)]
pub struct PeriodicTask {
    /// true une fois la tâche annulée
    gate: Arc<Mutex<bool>>,

    /// Tâche tokio qui cadence les ticks
    handle: Option<JoinHandle<()>>,

    period: Duration,
}

impl PeriodicTask {
    /// Lance `on_tick` toutes les `period`, le premier appel après une période
    ///
    /// Les ticks ne se chevauchent jamais : le suivant n'est attendu
    /// qu'une fois le callback précédent terminé. Un retard décale la
    /// cadence au lieu de déclencher une rafale de ticks en retard.
    pub fn spawn<F>(runtime: &Handle, period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        // tokio::time::interval panique sur une période nulle
        let period = period.max(Duration::from_millis(1));
        let gate = Arc::new(Mutex::new(false));
        let task_gate = Arc::clone(&gate);

        let handle = runtime.spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Tick immédiat de tokio : ignoré
            interval.tick().await;

            loop {
                interval.tick().await;

                let cancelled = task_gate.lock().unwrap_or_else(PoisonError::into_inner);
                if *cancelled {
                    break;
                }
                on_tick();
            }
        });

        debug!(period_ms = period.as_millis() as u64, "Periodic task spawned");

        Self {
            gate,
            handle: Some(handle),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Vérifie si la tâche a été annulée
    pub fn is_cancelled(&self) -> bool {
        *self.gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Annule la tâche
    ///
    /// Après le retour de cette méthode, `on_tick` ne sera plus jamais appelé,
    /// y compris pour un tick déjà échu mais pas encore exécuté.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        {
            let mut cancelled = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
            *cancelled = true;
        }

        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Periodic task cancelled");
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}
