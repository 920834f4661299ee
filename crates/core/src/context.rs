//! Anfragekontext: Zeitlimit und Abbruch fuer eine einzelne Anfrage
//!
//! Der Transport erzeugt pro Anfrage einen `RequestContext` und reicht ihn
//! an den Session-Manager weiter. Jeder Store-Aufruf laeuft ueber
//! [`RequestContext::ausfuehren`] und endet damit spaetestens an der Deadline
//! oder sobald der Kontext abgebrochen wird. Der unterbrochene Store-Future
//! wird dabei gedroppt.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Fehler, wenn eine Anfrage vor dem Ergebnis des Stores endet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KontextFehler {
    #[error("Zeitlimit der Anfrage ueberschritten")]
    Zeitlimit,

    #[error("Anfrage abgebrochen")]
    Abgebrochen,
}

/// Kontext einer laufenden Anfrage
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    abbruch: CancellationToken,
}

impl RequestContext {
    /// Kontext ohne Deadline, nur ueber Abbruch beendbar
    pub fn neu() -> Self {
        Self::default()
    }

    /// Kontext, der `zeitlimit` nach jetzt ablaeuft
    pub fn mit_zeitlimit(zeitlimit: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + zeitlimit),
            abbruch: CancellationToken::new(),
        }
    }

    /// Haengt den Kontext an einen bestehenden Abbruch-Token
    pub fn mit_abbruch(mut self, abbruch: CancellationToken) -> Self {
        self.abbruch = abbruch;
        self
    }

    /// Bricht alle laufenden und kuenftigen Store-Aufrufe dieses Kontexts ab
    pub fn abbrechen(&self) {
        self.abbruch.cancel();
    }

    pub fn ist_abgebrochen(&self) -> bool {
        self.abbruch.is_cancelled()
    }

    /// Fuehrt `fut` aus, solange Deadline und Abbruch es zulassen
    pub async fn ausfuehren<F, T>(&self, fut: F) -> Result<T, KontextFehler>
    where
        F: Future<Output = T>,
    {
        if self.abbruch.is_cancelled() {
            return Err(KontextFehler::Abgebrochen);
        }

        let deadline = async {
            match self.deadline {
                Some(d) => tokio::time::sleep_until(d).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.abbruch.cancelled() => Err(KontextFehler::Abgebrochen),
            _ = deadline => Err(KontextFehler::Zeitlimit),
            wert = fut => Ok(wert),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ohne_deadline_liefert_ergebnis() {
        let ctx = RequestContext::neu();
        let wert = ctx.ausfuehren(async { 42 }).await;
        assert_eq!(wert, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_beendet_langsamen_aufruf() {
        let ctx = RequestContext::mit_zeitlimit(Duration::from_millis(100));
        let ergebnis = ctx
            .ausfuehren(tokio::time::sleep(Duration::from_secs(5)))
            .await;
        assert_eq!(ergebnis, Err(KontextFehler::Zeitlimit));
    }

    #[tokio::test(start_paused = true)]
    async fn abgelaufene_deadline_startet_nichts() {
        let ctx = RequestContext::mit_zeitlimit(Duration::from_millis(10));
        tokio::time::advance(Duration::from_millis(20)).await;
        let ergebnis = ctx.ausfuehren(async { "zu spaet" }).await;
        assert_eq!(ergebnis, Err(KontextFehler::Zeitlimit));
    }

    #[tokio::test]
    async fn abbruch_vor_dem_aufruf() {
        let ctx = RequestContext::neu();
        ctx.abbrechen();
        assert!(ctx.ist_abgebrochen());
        let ergebnis = ctx.ausfuehren(async { 1 }).await;
        assert_eq!(ergebnis, Err(KontextFehler::Abgebrochen));
    }

    #[tokio::test]
    async fn abbruch_waehrend_des_aufrufs() {
        let token = CancellationToken::new();
        let ctx = RequestContext::neu().mit_abbruch(token.clone());

        let ausloeser = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            token.cancel();
        });

        let ergebnis = ctx.ausfuehren(std::future::pending::<()>()).await;
        assert_eq!(ergebnis, Err(KontextFehler::Abgebrochen));
        ausloeser.await.unwrap();
    }
}
