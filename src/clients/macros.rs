/// Generates a client method that sends one request variant and waits for its
/// [`Outcome`](crate::messages::Outcome). Only a closed or dropped actor
/// becomes an `Err`.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$crate::messages::Outcome<$return_type>, $crate::user_actor::UserError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| $crate::user_actor::UserError::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| $crate::user_actor::UserError::ActorCommunicationError("Actor dropped".to_string()))
            }
        }
    };
}
