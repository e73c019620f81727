use com::{Client, ComError, read_frame, write_frame};
use tokio::net::TcpListener;
use tokio::time::{Duration, timeout};

#[tokio::test]
async fn test_request_reply() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let payload = read_frame(&mut stream, 1024).await.unwrap();
        let reply: Vec<u8> = payload.iter().rev().copied().collect();
        write_frame(&mut stream, &reply).await.unwrap();
    });

    let mut client = Client::connect(addr).await.expect("connect failed");
    assert_eq!(client.peer_addr().unwrap(), addr);
    let reply = timeout(Duration::from_secs(5), client.request(b"abc"))
        .await
        .expect("reply timed out")
        .expect("request failed");
    assert_eq!(reply, b"cba");

    server.await.unwrap();
}

#[tokio::test]
async fn test_recv_reply_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        drop(stream);
    });

    let mut client = Client::connect(addr).await.unwrap();
    let result = client.recv_reply_timeout(Duration::from_millis(50)).await;
    assert!(matches!(result, Err(ComError::Timeout)), "got {:?}", result);

    server.await.unwrap();
}

#[tokio::test]
async fn test_server_close_is_connection_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        drop(stream);
    });

    let mut client = Client::connect(addr).await.unwrap();
    server.await.unwrap();
    let result = timeout(Duration::from_secs(5), client.recv_reply()).await.unwrap();
    assert!(matches!(result, Err(ComError::ConnectionClosed)), "got {:?}", result);
}

#[tokio::test]
async fn test_reply_over_limit_rejected() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        write_frame(&mut stream, &[0u8; 32]).await.unwrap();
    });

    let mut client = Client::connect(addr).await.unwrap().with_max_reply_bytes(16);
    let result = timeout(Duration::from_secs(5), client.recv_reply()).await.unwrap();
    assert!(matches!(result, Err(ComError::FrameTooLarge { len: 32, max: 16 })));

    server.await.unwrap();
}
