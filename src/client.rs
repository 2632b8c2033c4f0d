use tokio::sync::mpsc;
use log::{debug, error, info, trace, warn};
use crate::WidgetFoot;

/// Network work finished on a spawned task, routed back to the loop
enum Completion
{   Query
    {   outcome: Result<String, crate::error::Error>
      , reply: crate::SubmitQueryReplySender
    }
  , Health
    {   status: crate::ConnectionStatus
      , reply: Option<crate::CheckHealthReplySender>
    }
}

/// Widget state, owned by the event loop task
pub struct WidgetState
{   pub in_flight: bool
  , pub view: Box<dyn crate::view::View>
  , pub service: crate::service::ServiceClient
}

impl WidgetState
{   pub fn new(
      config: &crate::config::WidgetConfig
    , view: Box<dyn crate::view::View>
    ) -> Self
    {   debug!("Initializing WidgetState");
        WidgetState
        {   in_flight: false
          , view
          , service: crate::service::ServiceClient::new(config)
        }
    }

    fn handle_submit(
      &mut self
    , cmd: crate::SubmitQueryArgs
    , done_tx: &mpsc::UnboundedSender<Completion>
    )
    {   debug!("Submitting query: {:?}", cmd.text);

        let request = match crate::request::QueryRequest::from_input(
          &cmd.text
        )
        {   Some(request) => request
          , None => {
              warn!("Rejected empty query");
              let err = crate::error::Error::EmptyQuery;
              self.view.show_error(&err.to_string());
              self.view.scroll_to_results();
              let _ = cmd.reply.send(crate::SubmitOutcome::Failed(err));
              return;
            }
        };

        if self.in_flight
        {   debug!("Request already in flight, ignoring submit");
            let _ = cmd.reply.send(crate::SubmitOutcome::Ignored);
            return;
        }

        self.in_flight = true;
        self.view.set_loading(true);
        self.view.hide_results();

        let service = self.service.clone();
        let done_tx = done_tx.clone();
        let reply = cmd.reply;
        tokio::spawn(async move {
          let call = tokio::spawn(async move {
            service.post_query(&request).await
          });
          // A panicking call still has to re-enable the widget
          let outcome = match call.await
          {   Ok(outcome) => outcome
            , Err(e) => {
                error!("Query task failed: {}", e);
                Err(crate::error::Error::TaskFailed(e.to_string()))
              }
          };
          let _ = done_tx.send(Completion::Query { outcome, reply });
        });
    }

    fn start_health_check(
      &mut self
    , reply: Option<crate::CheckHealthReplySender>
    , done_tx: &mpsc::UnboundedSender<Completion>
    )
    {   debug!("Checking service health");
        self.view.set_status(&crate::ConnectionStatus::Connecting);

        let service = self.service.clone();
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
          let status = service.probe_health().await;
          let _ = done_tx.send(Completion::Health { status, reply });
        });
    }

    fn handle_completion(&mut self, done: Completion)
    {   match done
        {   Completion::Query { outcome, reply } => {
              let outcome = match outcome
              {   Ok(answer) => {
                    trace!("Answer: {}", answer);
                    let formatted
                      = crate::format::FormattedAnswer::parse(&answer);
                    let markup = formatted.to_markup();
                    self.view.show_results(&formatted);
                    crate::SubmitOutcome::Answered { markup }
                  }
                , Err(err) => {
                    error!("Detailed error: {:?}", err);
                    self.view.show_error(&err.to_string());
                    crate::SubmitOutcome::Failed(err)
                  }
              };
              self.view.scroll_to_results();
              self.in_flight = false;
              self.view.set_loading(false);
              let _ = reply.send(outcome);
            }
          , Completion::Health { status, reply } => {
              debug!("Health status: {}", status.label());
              self.view.set_status(&status);
              if let Some(reply) = reply
              {   let _ = reply.send(status);
              }
            }
        }
    }
}

/// Public API for the query widget - owns the task
pub struct QueryWidget
{   hand: crate::WidgetHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl QueryWidget
{   /// Create and spawn a new widget rendering into `view`.
    /// Kicks off one health probe immediately.
    pub fn new<V: crate::view::View>(
      config: crate::config::WidgetConfig
    , view: V
    ) -> Self
    {   debug!("Creating QueryWidget for {}", config.base_url);

        let (submit_query_tx, submit_query_rx)
          = mpsc::unbounded_channel();
        let (check_health_tx, check_health_rx)
          = mpsc::unbounded_channel();
        let (is_in_flight_tx, is_in_flight_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = crate::WidgetHand
        {   submit_query_tx
          , check_health_tx
          , is_in_flight_tx
          , kill_process_tx
        };

        let foot = crate::WidgetFoot
        {   submit_query_rx
          , check_health_rx
          , is_in_flight_rx
          , kill_process_rx
        };

        let view: Box<dyn crate::view::View> = Box::new(view);
        let _task_handle = tokio::spawn(async move {
          run_widget_loop(foot, config, view).await
        });

        QueryWidget
        {   hand
          , _task_handle
        }
    }

    /// Like `new`, but rejects an unusable config first
    pub fn try_new<V: crate::view::View>(
      config: crate::config::WidgetConfig
    , view: V
    ) -> Result<Self, crate::error::Error>
    {   config.validate()?;
        Ok(QueryWidget::new(config, view))
    }

    /// Submit a query - returns almost immediately
    pub async fn submit_query(
      &self
    , text: impl Into<String>
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SubmitQueryReply>,
        crate::error::Error
      >
    {   let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = crate::SubmitQueryArgs
        {   text: text.into()
          , reply: reply_tx
        };

        self.hand.submit_query_tx
          .send(cmd)
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Submit a query and wait for its outcome
    pub async fn query(
      &self
    , text: impl Into<String>
    ) -> Result<crate::SubmitOutcome, crate::error::Error>
    {   let mut reply_rx = self.submit_query(text).await?;
        reply_rx.recv().await.ok_or_else(disconnected)
    }

    /// Re-run the health probe - returns almost immediately
    pub async fn check_health(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::CheckHealthReply>,
        crate::error::Error
      >
    {   let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        self.hand.check_health_tx
          .send(crate::CheckHealthArgs { reply: reply_tx })
          .map_err(|_| disconnected())?;

        Ok(reply_rx)
    }

    /// Whether a query request is currently in flight
    pub async fn is_in_flight(&self)
      -> Result<bool, crate::error::Error>
    {   let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        self.hand.is_in_flight_tx
          .send(crate::IsInFlightArgs { reply: reply_tx })
          .map_err(|_| disconnected())?;

        reply_rx.recv().await.ok_or_else(disconnected)
    }

    /// Gracefully shutdown the widget
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down QueryWidget");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        self.hand.kill_process_tx
          .send(crate::KillProcessArgs { reply: reply_tx })
          .map_err(|_| {
            error!("Widget channel already closed");
            crate::error::Error::Other(
              "Widget already shutdown".to_string()
            )
          })?;

        match reply_rx.recv().await
        {   Some(result) => {
              debug!("Widget shutdown confirmed");
              result
            }
          , None => Err(disconnected())
        }
    }
}

fn disconnected() -> crate::error::Error
{   error!("Widget channel closed");
    crate::error::Error::Other("Widget disconnected".to_string())
}

/// Main widget event loop
///
/// Commands and network completions are handled one at a time here,
/// so the in-flight flag and the view have a single writer.
async fn run_widget_loop(
  foot: crate::WidgetFoot
, config: crate::config::WidgetConfig
, view: Box<dyn crate::view::View>
)
{   debug!("Starting widget event loop");
    if config.verbose
    {   info!("Widget targeting {}", config.base_url);
    }

    let mut state = WidgetState::new(&config, view);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let WidgetFoot
    {   mut submit_query_rx
      , mut check_health_rx
      , mut is_in_flight_rx
      , mut kill_process_rx
    } = foot;

    state.start_health_check(None, &done_tx);

    loop
    { tokio::select!
      { biased;
        cmd = kill_process_rx.recv() => {
          if let Some(cmd) = cmd
          {   debug!("Received KillProcess");
              let _ = cmd.reply.send(Ok(()));
          }
          info!("QueryWidget shutting down");
          break;
        }
      , Some(cmd) = submit_query_rx.recv() => {
          state.handle_submit(cmd, &done_tx);
        }
      , Some(cmd) = check_health_rx.recv() => {
          state.start_health_check(Some(cmd.reply), &done_tx);
        }
      , Some(cmd) = is_in_flight_rx.recv() => {
          let _ = cmd.reply.send(state.in_flight);
        }
      , Some(done) = done_rx.recv() => {
          state.handle_completion(done);
        }
      }
    }
}
