//! # Metered Stream
//!
//! Pass-through decorator that reports the byte count of every read and
//! write to a [`BandwidthReporter`].
//!
//! Counts are reported after the inner call returns, so a short read or a
//! partial write reports only what actually moved. A call that fails
//! reports zero. A poll that returns `Pending` reports nothing. Flush and
//! shutdown are forwarded unmetered.

use crate::ports::{BandwidthReporter, PeerStream};
use pin_project_lite::pin_project;
use shared_types::{PeerId, ProtocolId};
use std::io::{self, Read, Write};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

pin_project! {
    /// A stream whose traffic is reported per peer and protocol.
    pub struct MeteredStream<S> {
        #[pin]
        inner: S,
        protocol: ProtocolId,
        peer: PeerId,
        reporter: Arc<dyn BandwidthReporter>,
    }
}

/// Wrap `base`, reading protocol and peer from the stream itself.
pub fn wrap_stream<S>(base: S, reporter: Arc<dyn BandwidthReporter>) -> MeteredStream<S>
where
    S: PeerStream,
{
    let protocol = base.protocol();
    let peer = base.remote_peer();
    MeteredStream::new(base, protocol, peer, reporter)
}

impl<S> MeteredStream<S> {
    /// Wrap `inner` with an explicit protocol and peer.
    pub fn new(
        inner: S,
        protocol: ProtocolId,
        peer: PeerId,
        reporter: Arc<dyn BandwidthReporter>,
    ) -> Self {
        tracing::trace!(peer = %peer, protocol = %protocol, "Metering stream");
        Self {
            inner,
            protocol,
            peer,
            reporter,
        }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Drop the decorator and hand back the inner stream.
    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn peer(&self) -> &PeerId {
        &self.peer
    }

    pub fn protocol_id(&self) -> &ProtocolId {
        &self.protocol
    }
}

impl<S> PeerStream for MeteredStream<S> {
    fn protocol(&self) -> ProtocolId {
        self.protocol.clone()
    }

    fn remote_peer(&self) -> PeerId {
        self.peer.clone()
    }
}

impl<S: Read> Read for MeteredStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let result = self.inner.read(buf);
        let n = result.as_ref().map_or(0, |n| *n);
        self.reporter
            .log_recv_stream(n as u64, &self.protocol, &self.peer);
        result
    }
}

impl<S: Write> Write for MeteredStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let result = self.inner.write(buf);
        let n = result.as_ref().map_or(0, |n| *n);
        self.reporter
            .log_sent_stream(n as u64, &self.protocol, &self.peer);
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<S: AsyncRead> AsyncRead for MeteredStream<S> {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.project();
        let before = buf.filled().len();
        let poll = this.inner.poll_read(cx, buf);
        match &poll {
            Poll::Ready(Ok(())) => {
                let n = buf.filled().len().saturating_sub(before);
                this.reporter.log_recv_stream(n as u64, this.protocol, this.peer);
            }
            Poll::Ready(Err(_)) => this.reporter.log_recv_stream(0, this.protocol, this.peer),
            Poll::Pending => {}
        }
        poll
    }
}

impl<S: AsyncWrite> AsyncWrite for MeteredStream<S> {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.project();
        let poll = this.inner.poll_write(cx, buf);
        match &poll {
            Poll::Ready(Ok(n)) => this.reporter.log_sent_stream(*n as u64, this.protocol, this.peer),
            Poll::Ready(Err(_)) => this.reporter.log_sent_stream(0, this.protocol, this.peer),
            Poll::Pending => {}
        }
        poll
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.project().inner.poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.project().inner.poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BandwidthCounter;
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Records every callback, including zero-byte ones.
    #[derive(Default)]
    pub(super) struct Recorder {
        pub recv: Mutex<Vec<u64>>,
        pub sent: Mutex<Vec<u64>>,
    }

    impl BandwidthReporter for Recorder {
        fn log_recv_stream(&self, bytes: u64, _: &ProtocolId, _: &PeerId) {
            self.recv.lock().unwrap().push(bytes);
        }

        fn log_sent_stream(&self, bytes: u64, _: &ProtocolId, _: &PeerId) {
            self.sent.lock().unwrap().push(bytes);
        }
    }

    /// Accepts at most `limit` bytes per write.
    struct ShortWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = buf.len().min(self.limit);
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    struct Negotiated(Cursor<Vec<u8>>);

    impl PeerStream for Negotiated {
        fn protocol(&self) -> ProtocolId {
            ProtocolId::new("/bazaar/app/1.0.0")
        }

        fn remote_peer(&self) -> PeerId {
            PeerId::new("QmVendor")
        }
    }

    impl Read for Negotiated {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.0.read(buf)
        }
    }

    pub(super) fn ids() -> (ProtocolId, PeerId) {
        (ProtocolId::new("/bazaar/app/1.0.0"), PeerId::new("QmBuyer"))
    }

    #[test]
    fn test_read_passes_bytes_through_and_reports() {
        let recorder = Arc::new(Recorder::default());
        let (protocol, peer) = ids();
        let mut stream =
            MeteredStream::new(Broken, protocol.clone(), peer.clone(), recorder.clone());
        assert!(stream.read(&mut [0u8; 1]).is_err());

        let mut stream = MeteredStream::new(
            Negotiated(Cursor::new(b"hello world".to_vec())),
            protocol,
            peer,
            recorder.clone(),
        );

        let mut buf = [0u8; 5];
        assert_eq!(stream.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");

        let mut rest = Vec::new();
        stream.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b" world");

        let recv = recorder.recv.lock().unwrap().clone();
        assert_eq!(recv.iter().sum::<u64>(), 11);
        assert_eq!(recv[..2], [0, 5]);
    }

    #[test]
    fn test_partial_write_reports_only_written_bytes() {
        let recorder = Arc::new(Recorder::default());
        let (protocol, peer) = ids();
        let mut stream = MeteredStream::new(
            ShortWriter {
                written: Vec::new(),
                limit: 3,
            },
            protocol,
            peer,
            recorder.clone(),
        );

        let requested = b"abcdefgh";
        let n = stream.write(requested).unwrap();
        assert_eq!(n, 3);
        assert_eq!(*recorder.sent.lock().unwrap(), vec![3]);

        stream.write_all(&requested[n..]).unwrap();
        stream.flush().unwrap();

        let sent: u64 = recorder.sent.lock().unwrap().iter().sum();
        assert_eq!(sent, requested.len() as u64);
        assert_eq!(stream.into_inner().written, requested);
    }

    #[test]
    fn test_failed_read_reports_zero_and_returns_error() {
        let recorder = Arc::new(Recorder::default());
        let (protocol, peer) = ids();
        let mut stream = MeteredStream::new(Broken, protocol, peer, recorder.clone());

        let err = stream.read(&mut [0u8; 4]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(*recorder.recv.lock().unwrap(), vec![0]);
    }

    #[test]
    fn test_wrap_stream_uses_negotiated_identity() {
        let counter = Arc::new(BandwidthCounter::new());
        let mut stream = wrap_stream(Negotiated(Cursor::new(vec![1, 2, 3])), counter.clone());

        assert_eq!(stream.remote_peer(), PeerId::new("QmVendor"));
        let mut out = Vec::new();
        stream.read_to_end(&mut out).unwrap();

        assert_eq!(counter.stats_for_peer(&PeerId::new("QmVendor")).total_in, 3);
        assert_eq!(
            counter
                .stats_for_protocol(&ProtocolId::new("/bazaar/app/1.0.0"))
                .total_in,
            3
        );
    }

    mod async_io {
        use super::{ids, Recorder};
        use crate::domain::BandwidthCounter;
        use crate::stream::MeteredStream;
        use std::sync::Arc;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        #[tokio::test]
        async fn test_round_trip_over_duplex() {
            let counter = Arc::new(BandwidthCounter::new());
            let (client, mut server) = tokio::io::duplex(64);
            let (protocol, peer) = ids();
            let mut stream = MeteredStream::new(client, protocol, peer.clone(), counter.clone());

            stream.write_all(b"order-ack").await.unwrap();
            stream.flush().await.unwrap();

            let mut received = [0u8; 9];
            server.read_exact(&mut received).await.unwrap();
            assert_eq!(&received, b"order-ack");

            server.write_all(b"ok").await.unwrap();
            let mut reply = [0u8; 2];
            stream.read_exact(&mut reply).await.unwrap();
            assert_eq!(&reply, b"ok");

            let stats = counter.stats_for_peer(&peer);
            assert_eq!(stats.total_out, 9);
            assert_eq!(stats.total_in, 2);
        }

        #[tokio::test]
        async fn test_eof_reports_zero() {
            let recorder = Arc::new(Recorder::default());
            let (client, server) = tokio::io::duplex(8);
            drop(server);
            let (protocol, peer) = ids();
            let mut stream = MeteredStream::new(client, protocol, peer, recorder.clone());

            let mut buf = [0u8; 4];
            assert_eq!(stream.read(&mut buf).await.unwrap(), 0);
            assert_eq!(*recorder.recv.lock().unwrap(), vec![0]);
        }
    }
}
