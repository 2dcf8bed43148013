//! Integration tests for the WebSocket client transport.
//!
//! Each test stands up a bare `tokio-tungstenite` server on a random port
//! and connects a [`WebSocketConnection`] to it, so frames really cross a
//! socket.

#[cfg(feature = "websocket")]
mod websocket {
    use futures_util::{SinkExt, StreamExt};
    use hangman_transport::{Connection, TransportError, WebSocketConnection};
    use tokio::net::TcpListener;
    use tokio_tungstenite::tungstenite::Message;

    type ServerWs = tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

    /// Binds a listener on an OS-assigned port and returns it with its
    /// `ws://` URL.
    async fn listen() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = listener.local_addr().expect("should have addr");
        (listener, format!("ws://{addr}"))
    }

    async fn accept(listener: TcpListener) -> ServerWs {
        let (stream, _) = listener.accept().await.expect("should accept");
        tokio_tungstenite::accept_async(stream)
            .await
            .expect("handshake should succeed")
    }

    #[tokio::test]
    async fn test_websocket_send_and_receive() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(accept(listener));

        let client = WebSocketConnection::connect(&url)
            .await
            .expect("should connect");
        let mut server_ws = server.await.expect("task should complete");

        assert!(client.id().into_inner() > 0);

        // --- Client sends: frames go out as text ---
        client
            .send(br#"{"event":"new:guess"}"#)
            .await
            .expect("send should succeed");
        let msg = server_ws.next().await.unwrap().unwrap();
        assert!(msg.is_text(), "JSON frames should be sent as text");
        assert_eq!(msg.into_data().as_ref(), br#"{"event":"new:guess"}"#);

        // --- Server sends text, client receives bytes ---
        server_ws
            .send(Message::Text(r#"{"event":"new:state"}"#.to_string().into()))
            .await
            .unwrap();
        let received = client
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, br#"{"event":"new:state"}"#);

        // --- Binary frames are accepted too ---
        server_ws
            .send(Message::Binary(b"raw".to_vec().into()))
            .await
            .unwrap();
        let received = client.recv().await.unwrap().unwrap();
        assert_eq!(received, b"raw");

        client.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_server_close() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(accept(listener));

        let client = WebSocketConnection::connect(&url).await.unwrap();
        let mut server_ws = server.await.unwrap();

        server_ws.send(Message::Close(None)).await.unwrap();

        let result = client.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on server close");
    }

    #[tokio::test]
    async fn test_websocket_send_rejects_non_utf8() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(accept(listener));

        let client = WebSocketConnection::connect(&url).await.unwrap();
        let _server_ws = server.await.unwrap();

        let err = client.send(&[0xff, 0xfe]).await.unwrap_err();
        assert!(matches!(err, TransportError::SendFailed(_)));
    }

    #[tokio::test]
    async fn test_websocket_connect_to_closed_port_fails() {
        let (listener, url) = listen().await;
        drop(listener);

        let result = WebSocketConnection::connect(&url).await;
        assert!(matches!(result, Err(TransportError::ConnectFailed(_))));
    }
}
